//! Browser client for Pong
//!
//! Draws on a 2D canvas, keeps scores in `localStorage` and drives the
//! session from `requestAnimationFrame`.
//! Only compiled for the wasm32 target.

#![cfg(target_arch = "wasm32")]

mod canvas;
mod dom;
mod input;
mod logging;
mod scheduler;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use canvas::CanvasSurface;
use dom::{Elements, SetupPanel};
use game_core::{Config, GameRng, Session};
use scheduler::RafScheduler;
use scoreboard::{MemoryStore, ScoreStore};
use storage::LocalStorageStore;
use wasm_bindgen::prelude::*;

/// Everything a frame or input callback needs
pub(crate) struct App {
    pub session: Session,
    pub surface: CanvasSurface,
    pub scheduler: RafScheduler,
}

impl App {
    /// Run one scheduled frame
    fn frame(&mut self) {
        let App {
            session,
            surface,
            scheduler,
        } = self;
        session.on_frame(scheduler, surface);
    }

    /// Start a game with the names currently typed into the form
    pub fn start(&mut self, player1: &str, player2: &str) {
        let App {
            session,
            surface,
            scheduler,
        } = self;
        let result = session.start(player1, player2, scheduler, surface);
        if !result.success() {
            tracing::debug!(phase = ?result.from(), "start ignored");
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let elements = Elements::find()?;
    let config = load_config(&elements);
    elements.canvas.set_width(config.playfield_width as u32);
    elements.canvas.set_height(config.playfield_height as u32);

    let store: Box<dyn ScoreStore> = match LocalStorageStore::new() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "localStorage unavailable; scores will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let session = Session::new(config, store, GameRng::from_entropy())
        .with_listener(Box::new(SetupPanel::new(&elements)));
    let record = session.record();
    elements.player1.set_value(&record.player1.name);
    elements.player2.set_value(&record.player2.name);

    let mut surface = CanvasSurface::new(&elements.canvas)?;
    session.render(&mut surface);

    let scheduler = RafScheduler::new()?;
    let callback = scheduler.callback();
    let app = Rc::new(RefCell::new(App {
        session,
        surface,
        scheduler,
    }));

    let frame_app = app.clone();
    *callback.borrow_mut() = Some(Closure::new(move || match frame_app.try_borrow_mut() {
        Ok(mut app) => app.frame(),
        Err(_) => tracing::warn!("frame callback re-entered; skipping"),
    }));

    input::attach(&app, &elements)?;
    tracing::info!("pong client ready");
    Ok(())
}

/// Config from the optional `#pong-config` JSON block, else sized to the canvas
fn load_config(elements: &Elements) -> Config {
    let config = match elements.config_json() {
        Some(raw) => Config::from_json(&raw),
        None => {
            let config = Config {
                playfield_width: elements.canvas.width() as f32,
                playfield_height: elements.canvas.height() as f32,
                ..Config::default()
            };
            config.validate().map(|()| config)
        }
    };
    config.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid configuration; using defaults");
        Config::default()
    })
}

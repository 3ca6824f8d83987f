//! DOM lookup and the setup panel

use game_core::{Phase, PhaseChange, PhaseListener};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement};

const CANVAS_ID: &str = "pong";
const SETTINGS_ID: &str = "settings";
const WINNER_ID: &str = "winner";
const PLAYER1_ID: &str = "player1Name";
const PLAYER2_ID: &str = "player2Name";
const START_ID: &str = "startBtn";
const CONFIG_ID: &str = "pong-config";

/// Page elements the client talks to
pub struct Elements {
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub settings: HtmlElement,
    pub winner: HtmlElement,
    pub player1: HtmlInputElement,
    pub player2: HtmlInputElement,
    pub start_button: HtmlElement,
}

impl Elements {
    pub fn find() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            canvas: element(&document, CANVAS_ID)?,
            settings: element(&document, SETTINGS_ID)?,
            winner: element(&document, WINNER_ID)?,
            player1: element(&document, PLAYER1_ID)?,
            player2: element(&document, PLAYER2_ID)?,
            start_button: element(&document, START_ID)?,
            document,
        })
    }

    /// Text of the optional `<script id="pong-config" type="application/json">`
    pub fn config_json(&self) -> Option<String> {
        self.document
            .get_element_by_id(CONFIG_ID)
            .and_then(|el| el.text_content())
            .filter(|raw| !raw.trim().is_empty())
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

fn set_display(el: &HtmlElement, value: &str) {
    if let Err(err) = el.style().set_property("display", value) {
        tracing::warn!(?err, "could not set display");
    }
}

/// Hides the name form during play and shows the winner afterwards
pub struct SetupPanel {
    settings: HtmlElement,
    winner: HtmlElement,
}

impl SetupPanel {
    pub fn new(elements: &Elements) -> Self {
        Self {
            settings: elements.settings.clone(),
            winner: elements.winner.clone(),
        }
    }
}

impl PhaseListener for SetupPanel {
    fn on_phase_change(&mut self, change: &PhaseChange) {
        match change.to {
            Phase::Running => {
                set_display(&self.settings, "none");
                set_display(&self.winner, "none");
            }
            Phase::Ended => {
                if let Some(notice) = change.end_notice() {
                    self.winner.set_text_content(Some(&format!("{notice} 🎉")));
                    set_display(&self.winner, "inline-block");
                }
                set_display(&self.settings, "");
            }
            Phase::Idle => {}
        }
    }
}

//! Pointer, keyboard and start-trigger listeners

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{is_start_key, InputEvent, Key};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::dom::Elements;
use crate::App;

/// Map a DOM key event to a paddle input
pub fn key_event(event: &KeyboardEvent, pressed: bool) -> Option<InputEvent> {
    let key = Key::from_key_name(&event.key())?;
    Some(if pressed {
        InputEvent::KeyDown(key)
    } else {
        InputEvent::KeyUp(key)
    })
}

fn push(app: &Rc<RefCell<App>>, event: InputEvent) {
    if let Ok(mut app) = app.try_borrow_mut() {
        app.session.push_input(event);
    }
}

fn start(app: &Rc<RefCell<App>>, player1: &HtmlInputElement, player2: &HtmlInputElement) {
    match app.try_borrow_mut() {
        Ok(mut app) => app.start(&player1.value(), &player2.value()),
        Err(_) => tracing::warn!("start pressed during a frame; ignored"),
    }
}

fn listen<E, F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

pub fn attach(app: &Rc<RefCell<App>>, elements: &Elements) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    {
        let app = app.clone();
        let canvas = elements.canvas.clone();
        listen(&elements.canvas, "mousemove", move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let y = event.client_y() as f64 - rect.top();
            push(&app, InputEvent::PointerMoved { y: y as f32 });
        })?;
    }

    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let app = app.clone();
        listen(&window, kind, move |event: KeyboardEvent| {
            if let Some(input) = key_event(&event, pressed) {
                push(&app, input);
            }
        })?;
    }

    {
        let app = app.clone();
        let (player1, player2) = (elements.player1.clone(), elements.player2.clone());
        listen(&elements.start_button, "click", move |_: MouseEvent| {
            start(&app, &player1, &player2);
        })?;
    }

    for field in [&elements.player1, &elements.player2] {
        let app = app.clone();
        let (player1, player2) = (elements.player1.clone(), elements.player2.clone());
        listen(field, "keydown", move |event: KeyboardEvent| {
            if is_start_key(&event.key()) {
                start(&app, &player1, &player2);
            }
        })?;
    }

    Ok(())
}

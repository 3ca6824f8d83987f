//! `requestAnimationFrame` scheduler

use std::cell::RefCell;
use std::rc::Rc;

use game_core::FrameScheduler;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Slot for the frame closure. Filled once the app that owns the
/// scheduler exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        })
    }

    pub fn callback(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            tracing::warn!("frame requested before the callback was installed");
            return;
        };
        if let Err(err) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "requestAnimationFrame failed");
        }
    }

    fn request_frame_after(&mut self, delay_ms: u32) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            tracing::warn!("frame requested before the callback was installed");
            return;
        };
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
        {
            tracing::warn!(?err, "setTimeout failed");
        }
    }
}

//! `localStorage` backend for the score record

use scoreboard::{ScoreStore, StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::unavailable("no window"))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::unavailable("localStorage is disabled"))?;
        Ok(Self { storage })
    }
}

impl ScoreStore for LocalStorageStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

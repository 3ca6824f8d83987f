use std::collections::HashMap;

use thiserror::Error;

use crate::{ScoreRecord, STORAGE_KEY};

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by a key-value backend or while encoding the record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
    #[error("failed to encode score record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// Durable key-value storage for the score record
pub trait ScoreStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Load the record, falling back to defaults on any failure
pub fn load_record(store: &dyn ScoreStore) -> ScoreRecord {
    match store.read(STORAGE_KEY) {
        Ok(Some(raw)) => ScoreRecord::from_json(&raw),
        Ok(None) => ScoreRecord::default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read score record; using defaults");
            ScoreRecord::default()
        }
    }
}

/// Persist the record under [`STORAGE_KEY`]
pub fn save_record(store: &mut dyn ScoreStore, record: &ScoreRecord) -> StoreResult<()> {
    let json = record.to_json()?;
    store.write(STORAGE_KEY, &json)
}

/// In-memory store for headless play and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a raw entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

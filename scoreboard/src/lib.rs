//! Persisted scoreboard for Pong
//!
//! A single JSON record stores the name and score of both players:
//! `{"player1":{"name":"..","score":0},"player2":{"name":"..","score":0}}`.
//! Loading is lenient: anything missing or malformed falls back to defaults.

mod store;

pub use store::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the single entry the record is stored under
pub const STORAGE_KEY: &str = "pong-scores";

pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";
pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";

// ============================================================================
// Record types
// ============================================================================

/// Name and score of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: u32,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Read a player entry, substituting defaults field by field
    fn from_value(value: &Value, default_name: &str) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(default_name);

        let score = value
            .get("score")
            .and_then(|score| {
                score.as_u64().or_else(|| {
                    score
                        .as_f64()
                        .filter(|s| *s >= 0.0 && s.fract() == 0.0)
                        .map(|s| s as u64)
                })
            })
            .map(|s| u32::try_from(s).unwrap_or(u32::MAX))
            .unwrap_or(0);

        Self::new(name, score)
    }
}

/// Both players as persisted between sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player1: PlayerRecord,
    pub player2: PlayerRecord,
}

impl Default for ScoreRecord {
    fn default() -> Self {
        Self {
            player1: PlayerRecord::new(DEFAULT_PLAYER1_NAME, 0),
            player2: PlayerRecord::new(DEFAULT_PLAYER2_NAME, 0),
        }
    }
}

// ============================================================================
// JSON helpers
// ============================================================================

impl ScoreRecord {
    pub fn new(player1: PlayerRecord, player2: PlayerRecord) -> Self {
        Self { player1, player2 }
    }

    /// Serialize the record to its JSON form
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record. Never fails: unreadable input yields defaults.
    pub fn from_json(raw: &str) -> Self {
        let mut record = Self::default();

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "discarding unreadable score record");
                return record;
            }
        };

        if let Some(player1) = value.get("player1") {
            record.player1 = PlayerRecord::from_value(player1, DEFAULT_PLAYER1_NAME);
        }
        if let Some(player2) = value.get("player2") {
            record.player2 = PlayerRecord::from_value(player2, DEFAULT_PLAYER2_NAME);
        }

        record
    }
}

//! Persisted player record.
//!
//! Stored as JSON under a player key:
//!
//! ```json
//! {"version":1,"score":60,"gamePoints":60,"current_scenario_index":0}
//! ```
//!
//! Every field has a default, so records written by older front ends
//! (which had no `version` and sometimes no `gamePoints`) still decode.
//! Such records read as version 0 and are written back as the current
//! version. An absent or undecodable record reads as the zero record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::kv::KeyValueStore;
use crate::error::StoreError;

/// Schema version written by this crate.
pub const RECORD_VERSION: u32 = 1;

/// Score state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Schema version; 0 for records written before versioning.
    #[serde(default)]
    pub version: u32,

    /// Running score carried into the training scenarios.
    #[serde(default)]
    pub score: i64,

    /// Points earned in the memory game.
    #[serde(default, rename = "gamePoints")]
    pub game_points: i64,

    /// Training scenario the player is on; -1 before the first one.
    #[serde(default)]
    pub current_scenario_index: i64,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            score: 0,
            game_points: 0,
            current_scenario_index: 0,
        }
    }
}

impl PlayerRecord {
    /// Starting state of a player that has not begun the training flow.
    #[must_use]
    pub fn fresh_start() -> Self {
        Self {
            current_scenario_index: -1,
            ..Self::default()
        }
    }

    /// Decode a stored value, falling back to the zero record.
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(raw) {
            Ok(record) => {
                if record.version > RECORD_VERSION {
                    warn!(version = record.version, "player record is newer than this build");
                }
                record
            }
            Err(err) => {
                warn!(error = %err, "discarding undecodable player record");
                Self::default()
            }
        }
    }

    /// Encode as JSON, stamped with the current schema version.
    pub fn encode(&self) -> Result<String, StoreError> {
        let stamped = Self {
            version: RECORD_VERSION,
            ..self.clone()
        };
        Ok(serde_json::to_string(&stamped)?)
    }

    /// Set both the score and the game points to `points`.
    pub fn award(&mut self, points: i64) {
        self.game_points = points;
        self.score = points;
    }

    /// Read the record stored under `key`.
    #[must_use]
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        Self::decode(store.get(key).as_deref())
    }

    /// Overwrite the record stored under `key`.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) -> Result<(), StoreError> {
        store.set(key, self.encode()?)
    }
}

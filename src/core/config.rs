//! Game configuration.
//!
//! `GameConfig` collects every tunable of a round:
//! - The label set dealt onto the board (each label twice)
//! - Scoring and timer delays
//! - Store keys used on win
//! - Asset naming and the page the player is sent to after winning
//!
//! `Default` reproduces the classic six-hero board. Configs can also be
//! built with the `with_*` methods or loaded from TOML, where every field
//! is optional:
//!
//! ```toml
//! labels = ["phishing", "malware", "vpn"]
//! points_per_match = 5
//! mismatch_delay_ms = 750
//! ```

use std::path::Path;
use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::label::CardLabel;
use crate::error::ConfigError;

/// Key of the record that carries the score into later training steps.
pub const DEFAULT_SESSION_KEY: &str = "cyber_student";

/// Key of the shared player record that is reset on win.
pub const DEFAULT_SHARED_PLAYER_KEY: &str = "teacher_user_id_1";

/// Most labels a board can hold; card ids are `u16` and every label is dealt twice.
pub const MAX_LABELS: usize = 32_767;

/// Complete round configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Labels dealt onto the board. Each appears exactly twice.
    pub labels: Vec<CardLabel>,

    /// Points awarded per matched pair.
    pub points_per_match: i64,

    /// How long a mismatched pair stays face-up, in milliseconds.
    pub mismatch_delay_ms: u64,

    /// Delay between winning and the return-to-module prompt, in milliseconds.
    pub win_prompt_delay_ms: u64,

    /// Store key of the session record updated with the award.
    pub session_key: String,

    /// Store key of the shared record reset on win. `None` disables the reset
    /// and the return-to-module prompt.
    pub shared_player_key: Option<String>,

    /// Page the player is sent to after confirming the win prompt.
    pub entry_page: String,

    /// Text of the win prompt.
    pub win_prompt: String,

    /// Directory holding one face image per label.
    pub asset_dir: String,

    /// File extension of face images.
    pub asset_ext: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            labels: CardLabel::defaults(),
            points_per_match: 10,
            mismatch_delay_ms: 1000,
            win_prompt_delay_ms: 1000,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            shared_player_key: Some(DEFAULT_SHARED_PLAYER_KEY.to_string()),
            entry_page: "index.html".to_string(),
            win_prompt: "Congratulations! You completed the memory game!\n\n\
                         Go back to the Cybersecurity Module?"
                .to_string(),
            asset_dir: "images".to_string(),
            asset_ext: "png".to_string(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check the invariants a round relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.is_empty() {
            return Err(ConfigError::Invalid("at least one label is required".into()));
        }
        if self.labels.len() > MAX_LABELS {
            return Err(ConfigError::Invalid(format!(
                "at most {MAX_LABELS} labels fit on a board, got {}",
                self.labels.len()
            )));
        }
        let mut seen = FxHashSet::default();
        for label in &self.labels {
            if label.as_str().is_empty() {
                return Err(ConfigError::Invalid("labels must not be empty".into()));
            }
            if !seen.insert(label) {
                return Err(ConfigError::Invalid(format!("duplicate label `{label}`")));
            }
        }
        if self.points_per_match < 0 {
            return Err(ConfigError::Invalid("points_per_match must not be negative".into()));
        }
        if self.shared_player_key.as_deref() == Some(self.session_key.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "shared_player_key `{}` would overwrite the session record",
                self.session_key
            )));
        }
        Ok(())
    }

    /// Replace the label set.
    #[must_use]
    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<CardLabel>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set points awarded per pair.
    #[must_use]
    pub fn with_points_per_match(mut self, points: i64) -> Self {
        self.points_per_match = points;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the win prompt delay.
    #[must_use]
    pub fn with_win_prompt_delay(mut self, delay: Duration) -> Self {
        self.win_prompt_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the session record key.
    #[must_use]
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Set or clear the shared player record key.
    #[must_use]
    pub fn with_shared_player_key(mut self, key: Option<String>) -> Self {
        self.shared_player_key = key;
        self
    }

    /// Set the entry page.
    #[must_use]
    pub fn with_entry_page(mut self, page: impl Into<String>) -> Self {
        self.entry_page = page.into();
        self
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        u32::try_from(self.labels.len()).unwrap_or(u32::MAX)
    }

    /// Mismatch delay as a `Duration`.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Win prompt delay as a `Duration`.
    #[must_use]
    pub fn win_prompt_delay(&self) -> Duration {
        Duration::from_millis(self.win_prompt_delay_ms)
    }

    /// Points awarded for `pairs` matched pairs.
    #[must_use]
    pub fn award_for(&self, pairs: u32) -> i64 {
        i64::from(pairs) * self.points_per_match
    }
}

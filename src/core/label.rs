//! Card labels: the symbol printed on the face of a card.
//!
//! Two cards match when their labels are equal. Labels also name the
//! face image asset, so they are kept as short lowercase identifiers.

use serde::{Deserialize, Serialize};

/// Labels dealt by a default round.
pub const DEFAULT_LABELS: [&str; 6] = [
    "rizal",
    "bonifacio",
    "mabini",
    "aguinaldo",
    "tandang_sora",
    "silang",
];

/// The symbol on a card face.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardLabel(String);

impl CardLabel {
    /// Create a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The raw label string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the face image, `{dir}/{label}.{ext}`.
    #[must_use]
    pub fn asset_path(&self, dir: &str, ext: &str) -> String {
        format!("{}/{}.{}", dir.trim_end_matches('/'), self.0, ext)
    }

    /// Human readable name used as image alt text.
    ///
    /// Upper-cases the first letter and turns the first `_` into a space:
    /// `tandang_sora` becomes `Tandang sora`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => {
                let rest = chars.as_str().replacen('_', " ", 1);
                first.to_uppercase().chain(rest.chars()).collect()
            }
            None => String::new(),
        }
    }

    /// The labels of a default round.
    #[must_use]
    pub fn defaults() -> Vec<CardLabel> {
        DEFAULT_LABELS.iter().map(|&l| CardLabel::new(l)).collect()
    }
}

impl std::fmt::Display for CardLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

//! Persisted dock settings.
//!
//! Stored as a flat JSON object:
//!
//! ```json
//! {
//!   "symbol": "NASDAQ:GOOGL",
//!   "theme": "dark",
//!   "currents_api_key": ""
//! }
//! ```
//!
//! # Reading
//!
//! Deserialization goes through [`RawSettings`], where every field is
//! optional.  A missing `symbol` or `theme` falls back to its default; the
//! credential defaults to the empty string, which means "not stored".
//!
//! The credential is also accepted as `credential` or `api_key`.  These are
//! separate fields rather than serde aliases, so a file carrying more than
//! one of them still parses; the first non-empty value in the order
//! `currents_api_key`, `credential`, `api_key` wins.
//!
//! Field declaration order is the on-disk order; serde serializes structs in
//! declaration order, so rewriting the file never reshuffles it.

use serde::{Deserialize, Serialize};

/// Ticker shown when nothing has been saved yet.
pub const DEFAULT_SYMBOL: &str = "NASDAQ:GOOGL";

/// UI theme used when nothing has been saved yet.
pub const DEFAULT_THEME: &str = "dark";

/// The user's dock settings.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawSettings")]
pub struct DockSettings {
    /// Exchange-qualified ticker symbol displayed by the chart widget.
    pub symbol: String,
    /// UI theme name, `"dark"` or `"light"` in practice.
    pub theme: String,
    /// Stored news API key.  Empty when the user never saved one.
    #[serde(rename = "currents_api_key")]
    pub credential: String,
}

/// On-disk shape accepted when reading.
#[derive(Deserialize)]
struct RawSettings {
    symbol: Option<String>,
    theme: Option<String>,
    currents_api_key: Option<String>,
    credential: Option<String>,
    api_key: Option<String>,
}

impl From<RawSettings> for DockSettings {
    fn from(raw: RawSettings) -> Self {
        let credential = [raw.currents_api_key, raw.credential, raw.api_key]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .unwrap_or_default();

        Self {
            symbol: raw.symbol.unwrap_or_else(default_symbol),
            theme: raw.theme.unwrap_or_else(default_theme),
            credential,
        }
    }
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for DockSettings {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            theme: default_theme(),
            credential: String::new(),
        }
    }
}

impl DockSettings {
    /// Returns `true` when a non-empty credential is stored.
    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }

    /// Returns a copy with `symbol` and `theme` replaced, credential kept.
    pub fn with_display(&self, symbol: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            theme: theme.into(),
            credential: self.credential.clone(),
        }
    }

    /// Returns a copy with only the credential replaced.
    pub fn with_credential(&self, credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            ..self.clone()
        }
    }
}

// The credential must never end up in a log line.
impl std::fmt::Debug for DockSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockSettings")
            .field("symbol", &self.symbol)
            .field("theme", &self.theme)
            .field(
                "credential",
                &if self.has_credential() { "<redacted>" } else { "<empty>" },
            )
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

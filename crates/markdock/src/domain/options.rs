//! Runtime options for the dock backend.
//!
//! [`DockOptions`] collects every setting that differs between deployments
//! of the widget: where the settings file lives, which endpoint to query, and
//! the behaviours that earlier builds hard-wired (a baked-in API key, saving
//! settings on shutdown).  Each of those is a named option here instead of a
//! silent difference between builds.
//!
//! The struct is plain data.  The binary fills it from CLI arguments and
//! environment variables; tests construct it directly.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use markdock_core::DEFAULT_CACHE_WINDOW;

/// Latest-news endpoint of the Currents API.
pub const DEFAULT_NEWS_ENDPOINT: &str = "https://api.currentsapi.services/v1/latest-news";

/// Fixed timeout for a single news request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable carrying the API key at startup.
pub const CREDENTIAL_ENV_VAR: &str = "CURRENTS_API_KEY";

/// API key compiled into the binary, if the build environment provided one
/// through `MARKDOCK_FALLBACK_API_KEY`.  Release builds should leave it unset:
/// anything placed here is readable by whoever has the binary.
pub const BUILD_FALLBACK_API_KEY: Option<&str> = option_env!("MARKDOCK_FALLBACK_API_KEY");

/// Where the settings file lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigLocation {
    /// `<platform config dir>/MarkDock/config.json`.
    #[default]
    PlatformDirectory,
    /// An explicit file path; its parent directory is created on demand.
    File(PathBuf),
}

/// What `on_stop` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownBehavior {
    /// Leave the settings file alone.
    #[default]
    Nothing,
    /// Save the default symbol and theme (the stored API key is preserved).
    PersistDefaults,
}

/// All runtime configuration for the dock backend.
///
/// # Example
///
/// ```rust
/// use markdock::domain::DockOptions;
///
/// let opts = DockOptions::default();
/// assert_eq!(opts.request_timeout.as_secs(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct DockOptions {
    pub config_location: ConfigLocation,
    /// Base URL of the news endpoint; query parameters are appended per request.
    pub news_endpoint: Url,
    pub request_timeout: Duration,
    /// How long a successful response is served from memory.
    pub cache_window: Duration,
    /// Last-resort API key tried after the environment and the settings file.
    pub fallback_credential: Option<String>,
    pub shutdown: ShutdownBehavior,
}

impl Default for DockOptions {
    /// | Field               | Default                                          |
    /// |---------------------|--------------------------------------------------|
    /// | config_location     | platform directory                               |
    /// | news_endpoint       | `https://api.currentsapi.services/v1/latest-news` |
    /// | request_timeout     | 10 seconds                                       |
    /// | cache_window        | 60 minutes                                       |
    /// | fallback_credential | [`BUILD_FALLBACK_API_KEY`]                       |
    /// | shutdown            | [`ShutdownBehavior::Nothing`]                    |
    fn default() -> Self {
        Self {
            config_location: ConfigLocation::default(),
            // The endpoint is a compile-time constant known to parse.
            news_endpoint: Url::parse(DEFAULT_NEWS_ENDPOINT).unwrap(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_window: DEFAULT_CACHE_WINDOW,
            fallback_credential: BUILD_FALLBACK_API_KEY
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            shutdown: ShutdownBehavior::default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Command bridge: exposes application-layer operations to the front-end.
//!
//! Every command is a free `async fn` that receives the shared [`AppState`]
//! and returns a [`CommandResult`].  A desktop shell registers these as its
//! IPC handlers; the headless binary in `main.rs` calls them directly.
//!
//! | Command               | Returns                      |
//! |-----------------------|------------------------------|
//! | `load_settings`       | [`SettingsDto`]              |
//! | `save_settings`       | confirmation message         |
//! | `save_api_key`        | confirmation message         |
//! | `fetch_news`          | raw news body (JSON text)    |
//! | `get_cached_news_age` | minutes, `-1` when uncached  |
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>` so every
//! response has the same shape: `{ success: bool, data: T | null, error:
//! string | null }`.  The front-end can always read `result.success` without
//! a try/catch around the call.
//!
//! The stored API key is never sent to the front-end; [`SettingsDto`] only
//! says whether one exists.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use markdock_core::{ApiKey, Clock, CredentialSource, DockSettings, SystemClock};

use crate::application::fetch_news::{HttpTransport, NewsFetcher};
use crate::application::lifecycle::{establish_credential, run_shutdown, HostNotifier};
use crate::application::manage_settings::{SettingsRepository, SettingsService};
use crate::domain::DockOptions;
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::storage::config::JsonConfigStore;

pub mod feed;

// ── Shared application state ──────────────────────────────────────────────────

/// The single controller owning everything a running widget needs.
///
/// Wrapped in `Arc` and handed to every command.  The news fetcher guards
/// its own cache and credential, so commands may run concurrently.
pub struct AppState {
    pub settings: SettingsService,
    pub news: NewsFetcher,
    notifier: Arc<dyn HostNotifier>,
    options: DockOptions,
}

impl AppState {
    /// Production wiring: JSON settings file, `reqwest` transport, system clock.
    pub fn new(options: DockOptions, notifier: Arc<dyn HostNotifier>) -> Arc<Self> {
        let repo = Arc::new(JsonConfigStore::new(options.config_location.clone()));
        Self::with_parts(
            options,
            repo,
            Arc::new(ReqwestTransport::new()),
            Arc::new(SystemClock),
            notifier,
        )
    }

    /// Wiring with explicit collaborators, used by tests and custom hosts.
    pub fn with_parts(
        options: DockOptions,
        repo: Arc<dyn SettingsRepository>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn HostNotifier>,
    ) -> Arc<Self> {
        let news = NewsFetcher::new(
            transport,
            clock,
            options.news_endpoint.clone(),
            options.request_timeout,
            options.cache_window,
        );
        Arc::new(Self {
            settings: SettingsService::new(repo),
            news,
            notifier,
            options,
        })
    }

    pub fn options(&self) -> &DockOptions {
        &self.options
    }

    /// Startup hook: resolves the API key.
    ///
    /// `env_credential` is the value of `CURRENTS_API_KEY` as read by the
    /// host.  Returns the winning source, or `None` after the host has been
    /// asked for a key.
    pub async fn on_start(&self, env_credential: Option<&str>) -> Option<CredentialSource> {
        establish_credential(
            env_credential,
            &self.settings,
            self.options.fallback_credential.as_deref(),
            &self.news,
            self.notifier.as_ref(),
        )
        .await
    }

    /// Shutdown hook: applies the configured [`ShutdownBehavior`].
    ///
    /// [`ShutdownBehavior`]: crate::domain::ShutdownBehavior
    pub fn on_stop(&self) {
        run_shutdown(self.options.shutdown, &self.settings);
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// Settings as shown to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDto {
    pub symbol: String,
    pub theme: String,
    pub has_api_key: bool,
}

impl From<&DockSettings> for SettingsDto {
    fn from(s: &DockSettings) -> Self {
        Self {
            symbol: s.symbol.clone(),
            theme: s.theme.clone(),
            has_api_key: s.has_credential(),
        }
    }
}

/// Unified response wrapper used by all commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T: Serialize> From<Result<T, String>> for CommandResult<T> {
    fn from(r: Result<T, String>) -> Self {
        match r {
            Ok(v) => Self::ok(v),
            Err(e) => Self::err(e),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the stored settings, or defaults if the file is missing or bad.
///
/// # Example (frontend)
/// ```ts
/// const { data } = await invoke<CommandResult<SettingsDto>>('load_settings');
/// ```
pub async fn load_settings(state: Arc<AppState>) -> CommandResult<SettingsDto> {
    CommandResult::ok(SettingsDto::from(&state.settings.load()))
}

/// Saves the displayed symbol and theme.  The stored API key is kept.
pub async fn save_settings(
    state: Arc<AppState>,
    symbol: String,
    theme: String,
) -> CommandResult<String> {
    state.settings.save(&symbol, &theme).into()
}

/// Installs `api_key` for this session and persists it.
///
/// The running fetcher switches to the new key even if writing the file
/// fails; the error is still reported.
pub async fn save_api_key(state: Arc<AppState>, api_key: String) -> CommandResult<String> {
    state.news.set_credential(ApiKey::new(api_key.as_str())).await;
    state.settings.save_credential(&api_key).into()
}

/// Returns the news feed body, served from cache inside the window.
pub async fn fetch_news(state: Arc<AppState>) -> CommandResult<String> {
    state
        .news
        .fetch_news()
        .await
        .map(|body| body.to_string())
        .map_err(|e| e.to_string())
        .into()
}

/// Minutes since the cached news was fetched, `-1` before the first fetch.
pub async fn get_cached_news_age(state: Arc<AppState>) -> CommandResult<i64> {
    CommandResult::ok(state.news.cache_age_minutes().await)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Startup and shutdown steps of the dock backend.
//!
//! # Startup
//!
//! [`establish_credential`] runs once when the host window opens.  It walks
//! the credential sources in priority order (environment, settings file,
//! build fallback) and installs the winner into the [`NewsFetcher`].  If no
//! source has a key, it raises [`HostEvent::CredentialRequired`] so the host
//! can prompt the user, and returns without failing: the widget keeps running
//! and news calls report `CredentialMissing` until a key is saved.
//!
//! # Shutdown
//!
//! [`run_shutdown`] applies the configured [`ShutdownBehavior`].

use tracing::{info, warn};

use markdock_core::{resolve_credential, CredentialSource, DEFAULT_SYMBOL, DEFAULT_THEME};

use crate::application::fetch_news::NewsFetcher;
use crate::application::manage_settings::SettingsService;
use crate::domain::ShutdownBehavior;

/// Signals sent from the backend to the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// No API key could be resolved; the user must provide one.
    CredentialRequired,
}

impl HostEvent {
    /// Event name the front-end listens for.
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::CredentialRequired => "request-api-key",
        }
    }
}

/// Outbound notification channel to the host.
///
/// Must not block: the backend never waits for a reply.
#[cfg_attr(test, mockall::automock)]
pub trait HostNotifier: Send + Sync {
    fn notify(&self, event: HostEvent);
}

/// Resolves the API key and installs it into `fetcher`.
///
/// Returns the winning source, or `None` after notifying the host that a
/// key is required.
pub async fn establish_credential(
    env_credential: Option<&str>,
    settings: &SettingsService,
    fallback: Option<&str>,
    fetcher: &NewsFetcher,
    notifier: &dyn HostNotifier,
) -> Option<CredentialSource> {
    match resolve_credential(env_credential, || settings.stored_credential(), fallback) {
        Some(resolved) => {
            if resolved.source == CredentialSource::BuildFallback {
                warn!("using the API key compiled into this build");
            }
            info!(source = %resolved.source, "news API key resolved");
            fetcher.set_credential(resolved.key).await;
            Some(resolved.source)
        }
        None => {
            warn!("no news API key configured; asking the host for one");
            notifier.notify(HostEvent::CredentialRequired);
            None
        }
    }
}

/// Applies `behavior` when the host window closes.
pub fn run_shutdown(behavior: ShutdownBehavior, settings: &SettingsService) {
    match behavior {
        ShutdownBehavior::Nothing => {}
        ShutdownBehavior::PersistDefaults => {
            if let Err(e) = settings.save(DEFAULT_SYMBOL, DEFAULT_THEME) {
                warn!("shutdown settings save failed: {e}");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

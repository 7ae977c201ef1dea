//! ManageSettingsUseCase: load and save the persisted dock settings.
//!
//! Every save is load → modify → write: a settings save only replaces
//! `symbol` and `theme`, a credential save only replaces the API key, and the
//! other fields are carried over from whatever is on disk.  Loads never fail;
//! the repository substitutes defaults.
//!
//! Save results are plain strings because they go straight to the settings
//! dialog.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use markdock_core::DockSettings;

/// Confirmation returned by a successful settings save.
pub const SETTINGS_SAVED: &str = "Settings saved successfully";

/// Confirmation returned by a successful API key save.
pub const API_KEY_SAVED: &str = "API Key saved successfully";

/// Error type for settings persistence.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config base directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("{0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Storage for [`DockSettings`].
///
/// The JSON file implementation lives in `infrastructure::storage::config`.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored settings, or defaults on any failure.
    fn load(&self) -> DockSettings;

    /// Replaces the stored settings with `settings`.
    fn save(&self, settings: &DockSettings) -> Result<(), SettingsError>;
}

/// Settings operations exposed to the UI bridge.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    pub fn load(&self) -> DockSettings {
        self.repo.load()
    }

    /// Stored API key, empty if none.
    pub fn stored_credential(&self) -> String {
        self.repo.load().credential
    }

    /// Saves `symbol` and `theme`, keeping the stored API key.
    pub fn save(&self, symbol: &str, theme: &str) -> Result<String, String> {
        let updated = self.repo.load().with_display(symbol, theme);
        match self.repo.save(&updated) {
            Ok(()) => {
                info!(symbol, theme, "settings saved");
                Ok(SETTINGS_SAVED.to_string())
            }
            Err(e) => {
                warn!("settings save failed: {e}");
                Err(describe_save_failure(&e))
            }
        }
    }

    /// Saves the API key, keeping `symbol` and `theme`.
    ///
    /// Only persists; updating the running fetcher is the caller's job.
    pub fn save_credential(&self, value: &str) -> Result<String, String> {
        let updated = self.repo.load().with_credential(value);
        match self.repo.save(&updated) {
            Ok(()) => {
                info!("API key saved");
                Ok(API_KEY_SAVED.to_string())
            }
            Err(e) => {
                warn!("API key save failed: {e}");
                Err(format!("Error: {e}"))
            }
        }
    }
}

fn describe_save_failure(e: &SettingsError) -> String {
    match e {
        SettingsError::NoPlatformConfigDir | SettingsError::CreateDir { .. } => {
            format!("Error getting config path: {e}")
        }
        SettingsError::Encode(_) => format!("Error encoding config: {e}"),
        _ => format!("Error writing file: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn stored() -> DockSettings {
        DockSettings {
            symbol: "NYSE:IBM".to_string(),
            theme: "light".to_string(),
            credential: "kept-key".to_string(),
        }
    }

    #[test]
    fn test_save_preserves_stored_credential() {
        // Arrange
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().times(1).returning(stored);
        repo.expect_save()
            .with(eq(DockSettings {
                symbol: "NASDAQ:AAPL".to_string(),
                theme: "dark".to_string(),
                credential: "kept-key".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(()));
        let service = SettingsService::new(Arc::new(repo));

        // Act
        let result = service.save("NASDAQ:AAPL", "dark");

        // Assert
        assert_eq!(result, Ok("Settings saved successfully".to_string()));
    }

    #[test]
    fn test_save_credential_preserves_symbol_and_theme() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().times(1).returning(stored);
        repo.expect_save()
            .with(eq(stored().with_credential("fresh")))
            .times(1)
            .returning(|_| Ok(()));
        let service = SettingsService::new(Arc::new(repo));

        let result = service.save_credential("fresh");

        assert_eq!(result, Ok("API Key saved successfully".to_string()));
    }

    #[test]
    fn test_path_failure_message() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().returning(DockSettings::default);
        repo.expect_save()
            .returning(|_| Err(SettingsError::NoPlatformConfigDir));
        let service = SettingsService::new(Arc::new(repo));

        let err = service.save("A", "dark").unwrap_err();

        assert_eq!(
            err,
            "Error getting config path: could not determine platform config directory"
        );
    }

    #[test]
    fn test_write_failure_message() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().returning(DockSettings::default);
        repo.expect_save().returning(|_| {
            Err(SettingsError::Write {
                path: PathBuf::from("/ro/config.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        });
        let service = SettingsService::new(Arc::new(repo));

        let err = service.save("A", "dark").unwrap_err();

        assert!(err.starts_with("Error writing file: "), "got {err}");
        assert!(err.contains("read-only"));
    }

    #[test]
    fn test_credential_failure_message_uses_plain_error_prefix() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().returning(DockSettings::default);
        repo.expect_save()
            .returning(|_| Err(SettingsError::NoPlatformConfigDir));
        let service = SettingsService::new(Arc::new(repo));

        let err = service.save_credential("k").unwrap_err();

        assert_eq!(err, "Error: could not determine platform config directory");
    }

    #[test]
    fn test_stored_credential_reads_repository() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_load().times(1).returning(stored);
        let service = SettingsService::new(Arc::new(repo));
        assert_eq!(service.stored_credential(), "kept-key");
    }
}

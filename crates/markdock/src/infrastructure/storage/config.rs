//! JSON-based settings persistence.
//!
//! Reads and writes [`DockSettings`] to the platform-appropriate file:
//! - Windows:  `%APPDATA%\MarkDock\config.json`
//! - Linux:    `$XDG_CONFIG_HOME/MarkDock/config.json` (or `~/.config/MarkDock/…`)
//! - macOS:    `~/Library/Application Support/MarkDock/config.json`
//!
//! or to an explicit file when [`ConfigLocation::File`] is configured.
//!
//! # Failure policy
//!
//! Loading is fail-open: a missing, unreadable or malformed file yields
//! [`DockSettings::default()`] so a bad settings file can never keep the
//! widget from starting.  Saving is fail-visible and returns
//! [`SettingsError`].
//!
//! # Atomic writes
//!
//! The new content goes to a temporary file created in the target directory,
//! is flushed to disk, and is then renamed over `config.json`.  A crash mid
//! write leaves either the old file or the new one, never half of each.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use markdock_core::DockSettings;

use crate::application::manage_settings::{SettingsError, SettingsRepository};
use crate::domain::ConfigLocation;

/// Directory name under the platform config base.
pub const APP_DIR_NAME: &str = "MarkDock";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    location: ConfigLocation,
}

impl JsonConfigStore {
    pub fn new(location: ConfigLocation) -> Self {
        Self { location }
    }

    /// Store at `path`, bypassing the platform directory lookup.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(ConfigLocation::File(path.into()))
    }

    /// Resolves the settings file path, creating its directory if absent.
    ///
    /// # Errors
    ///
    /// [`SettingsError::NoPlatformConfigDir`] when the platform base
    /// directory cannot be determined, [`SettingsError::CreateDir`] when the
    /// directory cannot be created.
    pub fn resolve_path(&self) -> Result<PathBuf, SettingsError> {
        let (dir, path) = match &self.location {
            ConfigLocation::PlatformDirectory => {
                let dir = platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)?;
                let path = dir.join(CONFIG_FILE_NAME);
                (dir, path)
            }
            ConfigLocation::File(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (dir, path.clone())
            }
        };

        std::fs::create_dir_all(&dir).map_err(|source| SettingsError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reads and parses the settings file.
    ///
    /// Unlike [`SettingsRepository::load`] this reports every failure,
    /// including a missing file.
    pub fn read(&self) -> Result<DockSettings, SettingsError> {
        let path = self.resolve_path()?;
        let content = std::fs::read(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&content).map_err(SettingsError::Parse)
    }

    /// Serializes `settings` and atomically replaces the settings file.
    pub fn write(&self, settings: &DockSettings) -> Result<(), SettingsError> {
        let path = self.resolve_path()?;
        let content = serde_json::to_vec_pretty(settings).map_err(SettingsError::Encode)?;
        write_atomic(&path, &content).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "settings written");
        Ok(())
    }
}

impl Default for JsonConfigStore {
    fn default() -> Self {
        Self::new(ConfigLocation::PlatformDirectory)
    }
}

impl SettingsRepository for JsonConfigStore {
    fn load(&self) -> DockSettings {
        match self.read() {
            Ok(settings) => settings,
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!("no settings file yet, using defaults");
                DockSettings::default()
            }
            Err(e) => {
                warn!("ignoring unusable settings file: {e}");
                DockSettings::default()
            }
        }
    }

    fn save(&self, settings: &DockSettings) -> Result<(), SettingsError> {
        self.write(settings)
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Resolves `<platform config base>/MarkDock`.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(APP_DIR_NAME))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME)
        })
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        // XDG_CONFIG_HOME or ~/.config; a relative XDG value is ignored.
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(APP_DIR_NAME))
    }

    #[cfg(not(any(target_os = "windows", unix)))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonConfigStore {
        JsonConfigStore::at(dir.path().join(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_load_returns_defaults_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(), DockSettings::default());
    }

    #[test]
    fn test_load_returns_defaults_for_malformed_json() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        // Act
        let loaded = store.load();

        // Assert
        assert_eq!(loaded, DockSettings::default());
        assert!(matches!(store.read(), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_load_returns_defaults_for_wrong_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[1, 2, 3]").unwrap();
        assert_eq!(store.load(), DockSettings::default());
    }

    #[test]
    fn test_write_then_read_round_trip_with_pretty_output() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = DockSettings {
            symbol: "NASDAQ:NVDA".to_string(),
            theme: "light".to_string(),
            credential: "abc".to_string(),
        };

        // Act
        store.write(&settings).expect("write");
        let raw = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();

        // Assert
        assert_eq!(store.read().unwrap(), settings);
        assert_eq!(
            raw,
            "{\n  \"symbol\": \"NASDAQ:NVDA\",\n  \"theme\": \"light\",\n  \"currents_api_key\": \"abc\"\n}"
        );
    }

    #[test]
    fn test_write_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(&DockSettings::default()).unwrap();
        store.write(&DockSettings::default()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(CONFIG_FILE_NAME)]);
    }

    #[test]
    fn test_resolve_path_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join(CONFIG_FILE_NAME);
        let store = JsonConfigStore::at(&nested);

        let path = store.resolve_path().expect("resolve");

        assert_eq!(path, nested);
        assert!(nested.parent().unwrap().is_dir());
    }

    #[test]
    fn test_resolve_path_fails_when_parent_is_a_file() {
        // Arrange: a regular file where the directory should be
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let store = JsonConfigStore::at(blocker.join(CONFIG_FILE_NAME));

        // Act / Assert
        assert!(matches!(
            store.resolve_path(),
            Err(SettingsError::CreateDir { .. })
        ));
        assert!(matches!(
            store.save(&DockSettings::default()),
            Err(SettingsError::CreateDir { .. })
        ));
        assert_eq!(store.load(), DockSettings::default());
    }

    #[test]
    fn test_platform_config_dir_ends_with_app_name() {
        // May be None in a stripped environment; only check shape when present.
        if let Some(dir) = platform_config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME), "got {dir:?}");
        }
    }
}

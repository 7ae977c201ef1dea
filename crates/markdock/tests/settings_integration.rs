//! Integration tests for settings persistence and startup credential
//! resolution against a real (temporary) settings file.

use std::sync::Arc;

use markdock::application::lifecycle::HostEvent;
use markdock::application::manage_settings::SettingsRepository;
use markdock::domain::{ConfigLocation, DockOptions, ShutdownBehavior};
use markdock::infrastructure::http::mock::ScriptedTransport;
use markdock::infrastructure::notifier::mock::RecordingNotifier;
use markdock::infrastructure::storage::config::JsonConfigStore;
use markdock::infrastructure::ui_bridge::{self, AppState};
use markdock_core::{CredentialSource, DockSettings, ManualClock};

struct Fixture {
    state: Arc<AppState>,
    store: JsonConfigStore,
    notifier: Arc<RecordingNotifier>,
    dir: tempfile::TempDir,
}

fn fixture(options: DockOptions) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let options = DockOptions {
        config_location: ConfigLocation::File(dir.path().join("config.json")),
        ..options
    };
    let store = JsonConfigStore::new(options.config_location.clone());
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::with_parts(
        options,
        Arc::new(store.clone()),
        Arc::new(ScriptedTransport::new()),
        Arc::new(ManualClock::new()),
        notifier.clone(),
    );
    Fixture {
        state,
        store,
        notifier,
        dir,
    }
}

fn no_fallback() -> DockOptions {
    DockOptions {
        fallback_credential: None,
        ..DockOptions::default()
    }
}

// ── Load / save ──────────────────────────────────────────────────────────────

#[test]
fn test_load_of_malformed_files_returns_exact_defaults() {
    let f = fixture(no_fallback());
    let path = f.dir.path().join("config.json");

    for content in ["", "{", "null", "\"text\"", "{\"symbol\": 42}", "\u{0}\u{1}"] {
        std::fs::write(&path, content).unwrap();
        assert_eq!(
            f.store.load(),
            DockSettings {
                symbol: "NASDAQ:GOOGL".to_string(),
                theme: "dark".to_string(),
                credential: String::new(),
            },
            "content {content:?}"
        );
    }
}

#[test]
fn test_save_then_load_keeps_existing_credential() {
    // Arrange
    let f = fixture(no_fallback());
    f.store
        .save(&DockSettings::default().with_credential("stored-key"))
        .unwrap();

    // Act
    let msg = f.state.settings.save("NYSE:DIS", "light");

    // Assert
    assert_eq!(msg, Ok("Settings saved successfully".to_string()));
    let loaded = f.store.load();
    assert_eq!(loaded.symbol, "NYSE:DIS");
    assert_eq!(loaded.theme, "light");
    assert_eq!(loaded.credential, "stored-key");
}

#[test]
fn test_save_credential_then_load_keeps_symbol_and_theme() {
    let f = fixture(no_fallback());
    f.state.settings.save("NASDAQ:AMZN", "light").unwrap();

    let msg = f.state.settings.save_credential("new-key");

    assert_eq!(msg, Ok("API Key saved successfully".to_string()));
    let loaded = f.store.load();
    assert_eq!(loaded.symbol, "NASDAQ:AMZN");
    assert_eq!(loaded.theme, "light");
    assert_eq!(loaded.credential, "new-key");
}

#[test]
fn test_file_naming_the_key_twice_survives_load_and_save() {
    // Arrange
    let f = fixture(no_fallback());
    std::fs::write(
        f.dir.path().join("config.json"),
        r#"{"symbol":"NYSE:IBM","theme":"light","currents_api_key":"a","credential":"b"}"#,
    )
    .unwrap();

    // Act
    let loaded = f.state.settings.load();
    f.state.settings.save("NYSE:IBM", "light").unwrap();

    // Assert
    assert_eq!(loaded.symbol, "NYSE:IBM");
    assert_eq!(loaded.theme, "light");
    assert_eq!(f.store.load().credential, "a");
}

#[test]
fn test_save_into_unwritable_location_reports_path_error() {
    // Arrange: the settings "directory" is a regular file
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let options = DockOptions {
        config_location: ConfigLocation::File(blocker.join("config.json")),
        ..no_fallback()
    };
    let state = AppState::with_parts(
        options.clone(),
        Arc::new(JsonConfigStore::new(options.config_location)),
        Arc::new(ScriptedTransport::new()),
        Arc::new(ManualClock::new()),
        Arc::new(RecordingNotifier::new()),
    );

    // Act
    let err = state.settings.save("A", "dark").unwrap_err();

    // Assert
    assert!(err.starts_with("Error getting config path: "), "got {err}");
    assert_eq!(state.settings.load(), DockSettings::default());
}

// ── Startup credential resolution ────────────────────────────────────────────

#[tokio::test]
async fn test_environment_key_beats_stored_key() {
    let f = fixture(no_fallback());
    f.store
        .save(&DockSettings::default().with_credential("file-key"))
        .unwrap();

    let source = f.state.on_start(Some("env-key")).await;

    assert_eq!(source, Some(CredentialSource::Environment));
    assert!(f.notifier.events().is_empty());
}

#[tokio::test]
async fn test_stored_key_used_without_environment() {
    let f = fixture(no_fallback());
    f.store
        .save(&DockSettings::default().with_credential("file-key"))
        .unwrap();

    let source = f.state.on_start(None).await;

    assert_eq!(source, Some(CredentialSource::StoredSettings));
    assert!(f.state.news.has_credential().await);
}

#[tokio::test]
async fn test_fallback_option_used_when_nothing_else_is_set() {
    let f = fixture(DockOptions {
        fallback_credential: Some("baked".to_string()),
        ..DockOptions::default()
    });

    let source = f.state.on_start(None).await;

    assert_eq!(source, Some(CredentialSource::BuildFallback));
    assert!(f.notifier.events().is_empty());
}

#[tokio::test]
async fn test_no_key_anywhere_requests_one_from_host() {
    // Arrange
    let f = fixture(no_fallback());

    // Act
    let source = f.state.on_start(Some("")).await;

    // Assert
    assert_eq!(source, None);
    assert_eq!(f.notifier.events(), vec![HostEvent::CredentialRequired]);
    assert!(!f.state.news.has_credential().await);
}

#[tokio::test]
async fn test_save_api_key_command_persists_and_installs_key() {
    let f = fixture(no_fallback());
    f.state.on_start(None).await;

    let result = ui_bridge::save_api_key(Arc::clone(&f.state), "from-dialog".to_string()).await;

    assert!(result.success);
    assert!(f.state.news.has_credential().await);
    assert_eq!(f.store.load().credential, "from-dialog");
}

// ── Shutdown ─────────────────────────────────────────────────────────────────

#[test]
fn test_on_stop_default_leaves_file_untouched() {
    let f = fixture(no_fallback());
    f.state.settings.save("NYSE:GE", "light").unwrap();

    f.state.on_stop();

    assert_eq!(f.store.load().symbol, "NYSE:GE");
}

#[test]
fn test_on_stop_persist_defaults_resets_display_and_keeps_key() {
    let f = fixture(DockOptions {
        shutdown: ShutdownBehavior::PersistDefaults,
        ..no_fallback()
    });
    f.state.settings.save("NYSE:GE", "light").unwrap();
    f.state.settings.save_credential("kept").unwrap();

    f.state.on_stop();

    assert_eq!(
        f.store.load(),
        DockSettings::default().with_credential("kept")
    );
}

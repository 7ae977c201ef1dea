//! markdock library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Layers
//!
//! ```text
//! [markdock]
//!   ├── domain/           DockOptions: endpoint, timeouts, deployment variants
//!   ├── application/      Use cases and the traits they depend on
//!   │     ├── fetch_news       cache-or-fetch, HttpTransport port
//!   │     ├── manage_settings  load / save with preserved fields
//!   │     └── lifecycle        credential resolution, shutdown, HostNotifier port
//!   └── infrastructure/
//!         ├── storage/    JSON settings file
//!         ├── http/       reqwest transport
//!         ├── notifier/   channel to the host shell
//!         └── ui_bridge/  AppState + commands for the presentation layer
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

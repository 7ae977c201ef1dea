//! Application layer use cases for the dock backend.
//!
//! Use cases here orchestrate the domain types from `markdock-core` and
//! depend only on traits (`HttpTransport`, `SettingsRepository`,
//! `HostNotifier`) that the infrastructure layer implements.  No file system
//! or network access happens in this layer directly.
//!
//! # Sub-modules
//!
//! - **`fetch_news`** – Serves the news feed from the in-memory cache or the
//!   remote API.  Owns the running instance's API key.
//!
//! - **`manage_settings`** – Loads and saves the persisted settings, always
//!   preserving the fields a given save does not touch.
//!
//! - **`lifecycle`** – Startup credential resolution and the configurable
//!   shutdown step.

pub mod fetch_news;
pub mod lifecycle;
pub mod manage_settings;

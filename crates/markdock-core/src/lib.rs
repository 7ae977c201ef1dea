//! # markdock-core
//!
//! Shared domain library for the MarkDock dock widget backend: the persisted
//! settings schema, the in-memory news cache, and the credential resolution
//! rules used at startup.
//!
//! This crate has zero dependencies on the file system, the network, or any
//! UI runtime.  Time is read through the [`Clock`] trait so the cache window
//! can be exercised deterministically in tests.
//!
//! # Architecture overview
//!
//! MarkDock is a small desktop widget that shows a ticker chart and a
//! business news feed.  The backend has two jobs:
//!
//! - **Settings** – remember the displayed symbol, the UI theme and the news
//!   API key between runs ([`DockSettings`]).
//! - **News** – fetch the feed from the remote API at most once per cache
//!   window ([`NewsCache`]), using a credential resolved from several sources
//!   ([`resolve_credential`]).
//!
//! The I/O for both lives in the `markdock` crate; this crate only holds the
//! rules.

pub mod clock;
pub mod domain;

pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::credential::{resolve_credential, ApiKey, CredentialSource, ResolvedCredential};
pub use domain::news_cache::{NewsCache, DEFAULT_CACHE_WINDOW};
pub use domain::settings::{DockSettings, DEFAULT_SYMBOL, DEFAULT_THEME};

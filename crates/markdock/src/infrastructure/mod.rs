//! Infrastructure layer for the dock backend.
//!
//! Contains OS-facing adapters: the JSON settings file, the HTTP transport,
//! the host notification channel, and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain` and
//! `markdock_core`, but MUST NOT be imported by them.

pub mod http;
pub mod notifier;
pub mod storage;
pub mod ui_bridge;

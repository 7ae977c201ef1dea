//! Domain entities for MarkDock.
//!
//! Pure rules with no infrastructure dependencies.  Outer layers (storage,
//! HTTP transport, UI bridge) depend on these types; nothing here depends on
//! them.

/// API key value type and the startup resolution order.
pub mod credential;

/// Whole-response news cache with a fixed validity window.
pub mod news_cache;

/// Persisted dock settings and their defaults.
pub mod settings;

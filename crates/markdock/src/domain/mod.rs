//! Domain layer for the dock backend: runtime options.
//!
//! The settings schema, cache, and credential rules live in `markdock-core`;
//! this module only holds the knobs a deployment can turn.

pub mod options;

pub use options::{
    ConfigLocation, DockOptions, ShutdownBehavior, BUILD_FALLBACK_API_KEY, CREDENTIAL_ENV_VAR,
    DEFAULT_NEWS_ENDPOINT, DEFAULT_REQUEST_TIMEOUT,
};

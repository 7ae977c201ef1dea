//! News API credential and its resolution order.
//!
//! At startup the running instance picks its API key from the first source
//! that yields a non-empty value:
//!
//! 1. the environment,
//! 2. the persisted settings file,
//! 3. a fallback baked in at build time (only when the build provides one).
//!
//! When all three come up empty the caller is told so and is expected to ask
//! the user for a key.  The settings source is a closure so the file is only
//! read when the environment did not already supply a key.

use std::fmt;

use tracing::debug;

/// An API key for the news endpoint.  `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw key for use in a request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    StoredSettings,
    BuildFallback,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialSource::Environment => "environment",
            CredentialSource::StoredSettings => "stored settings",
            CredentialSource::BuildFallback => "build fallback",
        };
        f.write_str(name)
    }
}

/// A non-empty credential together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub key: ApiKey,
    pub source: CredentialSource,
}

/// Picks the first non-empty credential in priority order.
///
/// `stored` is only invoked when `env` is absent or empty.  Returns `None`
/// when no source yields a key.
pub fn resolve_credential<F>(
    env: Option<&str>,
    stored: F,
    fallback: Option<&str>,
) -> Option<ResolvedCredential>
where
    F: FnOnce() -> String,
{
    if let Some(value) = env.filter(|v| !v.is_empty()) {
        return Some(ResolvedCredential {
            key: ApiKey::new(value),
            source: CredentialSource::Environment,
        });
    }

    let stored = stored();
    if !stored.is_empty() {
        return Some(ResolvedCredential {
            key: ApiKey::new(stored),
            source: CredentialSource::StoredSettings,
        });
    }

    if let Some(value) = fallback.filter(|v| !v.is_empty()) {
        return Some(ResolvedCredential {
            key: ApiKey::new(value),
            source: CredentialSource::BuildFallback,
        });
    }

    debug!("no credential source yielded a key");
    None
}

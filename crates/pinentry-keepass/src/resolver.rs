//! Secret resolution boundary.
//!
//! The dispatcher never knows where secrets live: it hands the announced key
//! identifier to a [`SecretResolver`] and forwards whatever comes back. The
//! boundary is keyed by the identifier so a real credential-store
//! integration can plug in; the shipped [`EnvSecretResolver`] is the
//! development stand-in that serves one configured value regardless of the
//! key.

use std::collections::HashMap;
use std::env;

/// Maps a key identifier to a stored secret.
///
/// Lookups are synchronous and side-effect-free from the dispatcher's point
/// of view; a slow implementation simply blocks the session for its
/// duration.
pub trait SecretResolver {
    /// Looks up the secret for the announced key identifier.
    ///
    /// Returns `None` when no secret is available. Implementations treat an
    /// empty stored value as absent; the protocol reports both cases with
    /// the same `ERR Operation cancelled` status.
    fn lookup(&self, identifier: &str) -> Option<String>;
}

/// Development stand-in resolving every identifier to one environment
/// variable.
///
/// A credential-store integration would index by the identifier; this
/// resolver ignores it and returns the single configured value, matching a
/// deployment against exactly one keyring entry.
#[derive(Debug, Clone)]
pub struct EnvSecretResolver {
    variable: String,
}

impl EnvSecretResolver {
    /// Environment variable consulted by [`EnvSecretResolver::default`].
    pub const DEFAULT_VARIABLE: &'static str = "PINENTRY_KEEPASS_PASS";

    /// Creates a resolver reading the given environment variable.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl Default for EnvSecretResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VARIABLE)
    }
}

impl SecretResolver for EnvSecretResolver {
    fn lookup(&self, _identifier: &str) -> Option<String> {
        env::var(&self.variable)
            .ok()
            .filter(|value| !value.is_empty())
    }
}

/// In-memory resolver keyed by identifier.
///
/// The reference shape for a credential-store integration, and the test
/// double used across the crate.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretResolver {
    entries: HashMap<String, String>,
}

impl StaticSecretResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous secret for the identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, secret: impl Into<String>) {
        self.entries.insert(identifier.into(), secret.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_entry(mut self, identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        self.insert(identifier, secret);
        self
    }
}

impl SecretResolver for StaticSecretResolver {
    fn lookup(&self, identifier: &str) -> Option<String> {
        self.entries
            .get(identifier)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

//! Upstream credentials and the process-wide bearer token holder.

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret as _, SecretString};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Login credentials for the upstream API. Immutable after load.
#[derive(Clone)]
pub struct Credential {
    pub email: String,
    password: SecretString,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let password: String = password.into();
        Self {
            email: email.into(),
            password: SecretString::new(password.into_boxed_str()),
        }
    }

    /// Returns the password in clear text, for building the login body only.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Shared bearer token, swapped atomically on every successful login.
///
/// Readers never block on a refresh: a request that starts while a refresh
/// is in flight uses whatever token was stored last. Concurrent refreshes are
/// not coordinated; each one overwrites the cell and the last write wins.
#[derive(Default)]
pub struct BearerToken {
    current: ArcSwapOption<SecretString>,
    generation: AtomicU64,
}

impl BearerToken {
    /// Creates an empty holder (no login has happened yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holder pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let holder = Self::new();
        holder.replace(token);
        holder
    }

    /// Returns the current token value, if any login has succeeded.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.current
            .load_full()
            .map(|secret| secret.expose_secret().to_string())
    }

    /// Overwrites the stored token.
    pub fn replace(&self, token: impl Into<String>) {
        let token: String = token.into();
        self.current
            .store(Some(Arc::new(SecretString::new(token.into_boxed_str()))));
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of times the token has been replaced since start-up.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Returns `true` if a token has been stored.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.current.load().is_some()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("set", &self.is_set())
            .field("generation", &self.generation())
            .finish()
    }
}

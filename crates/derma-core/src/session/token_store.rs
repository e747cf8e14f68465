// Durable storage for the admin bearer token.
//
// The session owns the in-memory copy; stores only persist it across
// restarts. File and keyring stores live in derma-config.

use std::sync::{Mutex, PoisonError};

use secrecy::SecretString;

use crate::error::CoreError;

/// The single key the token is persisted under.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

/// Somewhere the admin token survives a restart.
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    fn load(&self) -> Result<Option<SecretString>, CoreError>;

    fn save(&self, token: &SecretString) -> Result<(), CoreError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), CoreError>;
}

/// Process-lifetime store, for tests and `--no-persist` style front ends.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), CoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

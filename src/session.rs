//! Session context: the persisted token, role and cached user triple

use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::Storage;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "auth-token";

/// Storage key for the signed-in user's role
pub const ROLE_KEY: &str = "user-role";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user-data";

/// Explicit session context shared by the API client and the auth service.
///
/// Cloning is cheap; all clones see the same storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persisted bearer token
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// Persisted role of the signed-in user
    pub fn role(&self) -> Option<String> {
        self.storage.get(ROLE_KEY)
    }

    /// Persisted user record, still serialized
    pub fn user_data(&self) -> Option<String> {
        self.storage.get(USER_KEY)
    }

    /// Persist a new session.
    ///
    /// The token goes in last, so a failed write can never leave a token
    /// without its role. On failure the whole triple is cleared.
    pub fn persist(&self, token: &str, role: &str, user_json: &str) -> Result<(), StorageError> {
        let written = self
            .storage
            .set(ROLE_KEY, role)
            .and_then(|_| self.storage.set(USER_KEY, user_json))
            .and_then(|_| self.storage.set(TOKEN_KEY, token));

        if let Err(e) = written {
            if let Err(cleanup) = self.clear() {
                log::warn!("Failed to roll back partial session: {}", cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove token, role and user.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// failure is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let results = [
            self.storage.remove(TOKEN_KEY),
            self.storage.remove(ROLE_KEY),
            self.storage.remove(USER_KEY),
        ];
        results.into_iter().collect::<Result<Vec<_>, _>>().map(|_| ())
    }

    /// Clear the session after the server rejected `rejected`.
    ///
    /// Returns `false` and leaves storage alone when a different token has
    /// been stored since, e.g. by a login in another process.
    pub fn expire(&self, rejected: Option<&str>) -> Result<bool, StorageError> {
        let current = self.token();
        if current.is_some() && current.as_deref() != rejected {
            return Ok(false);
        }
        self.clear()?;
        Ok(true)
    }
}

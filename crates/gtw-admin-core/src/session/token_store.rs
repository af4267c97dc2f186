//! Credential bundle persistence

use crate::Result;
use crate::storage::{
    ACCESS_TOKEN_KEY, KeyValueStore, REFRESH_TOKEN_KEY, SESSION_KEYS, USER_KEY,
};
use gtw_admin_types::{CredentialBundle, UserRecord, UserValidation};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Reads and writes the credential bundle as one unit
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Wrap a storage backend
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Persist all three values together
    pub fn save(&self, bundle: &CredentialBundle) -> Result<()> {
        let user = serde_json::to_string(&bundle.user)?;
        self.storage.set_many(&[
            (ACCESS_TOKEN_KEY, bundle.access_token.as_str()),
            (REFRESH_TOKEN_KEY, bundle.refresh_token.as_str()),
            (USER_KEY, user.as_str()),
        ])?;
        debug!(user_id = %bundle.user.id, "Saved credentials");
        Ok(())
    }

    /// Load the bundle
    ///
    /// Returns `None` when any of the three values is missing. A stored user
    /// that does not parse wipes all three values.
    #[must_use]
    pub fn read(&self) -> Option<CredentialBundle> {
        let raw_user = self.storage.get(USER_KEY)?;
        let user = match UserRecord::validate(&raw_user) {
            UserValidation::Valid(user) => user,
            UserValidation::Invalid => {
                warn!("Stored user record is corrupt, clearing session");
                self.clear_logged();
                return None;
            }
        };
        Some(CredentialBundle {
            access_token: self.storage.get(ACCESS_TOKEN_KEY)?,
            refresh_token: self.storage.get(REFRESH_TOKEN_KEY)?,
            user,
        })
    }

    /// Remove all three values
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_many(&SESSION_KEYS)
    }

    /// Same as [`TokenStore::clear`] for callers that cannot surface errors
    pub(crate) fn clear_logged(&self) {
        if let Err(e) = self.clear() {
            error!(error = %e, "Failed to clear stored credentials");
        }
    }

    /// Raw access token, without checking the rest of the bundle
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Parse the stored user without side effects
    #[must_use]
    pub fn peek_user(&self) -> Option<UserRecord> {
        match UserRecord::validate(&self.storage.get(USER_KEY)?) {
            UserValidation::Valid(user) => Some(user),
            UserValidation::Invalid => None,
        }
    }

    /// Whether nothing at all is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        SESSION_KEYS.iter().all(|key| self.storage.get(key).is_none())
    }
}

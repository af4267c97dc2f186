//! "Is the caller an authenticated admin", derived from stored credentials

use super::TokenStore;
use gtw_admin_types::UserRecord;
use tracing::warn;

/// Answers authentication questions from the [`TokenStore`]
#[derive(Debug, Clone)]
pub struct SessionOracle {
    tokens: TokenStore,
}

impl SessionOracle {
    /// Build an oracle over the given store
    #[must_use]
    pub const fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// True iff both tokens are present and the cached user is an admin
    ///
    /// A complete bundle whose user is not an admin is cleared before
    /// returning false.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let Some(bundle) = self.tokens.read() else {
            return false;
        };
        if !bundle.has_tokens() {
            return false;
        }
        if !bundle.user.is_admin() {
            warn!(role = %bundle.user.role, "Stored user is not an admin, clearing session");
            self.tokens.clear_logged();
            return false;
        }
        true
    }

    /// Cached user, if it parses. Never modifies storage.
    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.tokens.peek_user()
    }

    /// The store this oracle reads
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, REFRESH_TOKEN_KEY, USER_KEY};
    use proptest::prelude::*;
    use rstest::rstest;
    use std::sync::Arc;

    fn seeded(user: &str, access: &str, refresh: &str) -> (Arc<MemoryStore>, SessionOracle) {
        let memory = Arc::new(MemoryStore::new());
        memory.set(USER_KEY, user).unwrap();
        memory.set(ACCESS_TOKEN_KEY, access).unwrap();
        memory.set(REFRESH_TOKEN_KEY, refresh).unwrap();
        let oracle = SessionOracle::new(TokenStore::new(memory.clone()));
        (memory, oracle)
    }

    const ADMIN: &str = r#"{"_id":"1","name":"Ada","email":"ada@gtw.dev","role":"admin"}"#;

    #[test]
    fn test_admin_bundle_is_authenticated() {
        let (memory, oracle) = seeded(ADMIN, "A", "R");
        assert!(oracle.is_authenticated());
        assert_eq!(memory.len(), 3);
    }

    #[rstest]
    #[case("", "R")]
    #[case("A", "")]
    fn test_empty_token_is_not_authenticated(#[case] access: &str, #[case] refresh: &str) {
        let (_, oracle) = seeded(ADMIN, access, refresh);
        assert!(!oracle.is_authenticated());
        assert!(oracle.current_user().is_some());
    }

    #[rstest]
    #[case(r#"{"role":"user"}"#)]
    #[case(r#"{"role":"superadmin"}"#)]
    #[case(r#"{"role":"ADMIN"}"#)]
    fn test_non_admin_bundle_is_cleared(#[case] user: &str) {
        let (memory, oracle) = seeded(user, "A", "R");
        assert!(oracle.current_user().is_some());
        assert!(!oracle.is_authenticated());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_missing_bundle_is_not_authenticated() {
        let oracle = SessionOracle::new(TokenStore::new(Arc::new(MemoryStore::new())));
        assert!(!oracle.is_authenticated());
        assert!(oracle.current_user().is_none());
    }

    proptest! {
        #[test]
        fn test_malformed_user_clears_store(raw in "\\PC*") {
            prop_assume!(matches!(
                UserRecord::validate(&raw),
                gtw_admin_types::UserValidation::Invalid
            ));
            let (memory, oracle) = seeded(&raw, "A", "R");
            prop_assert!(!oracle.is_authenticated());
            prop_assert!(memory.is_empty());
        }
    }
}

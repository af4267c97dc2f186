//! Persistent key/value storage backing the session
//!
//! The console keeps exactly three string values between runs. Backends only
//! need to store strings under string keys; interpretation of the values is
//! left to [`crate::session::TokenStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Result;

/// Key of the cached user record (JSON)
pub const USER_KEY: &str = "user";
/// Key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Every key the session writes
pub const SESSION_KEYS: [&str; 3] = [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

/// String key/value storage shared across the process
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Store several values at once. Backends that persist to disk override
    /// this to write once.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several keys at once
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

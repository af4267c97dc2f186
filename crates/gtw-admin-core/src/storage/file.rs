//! Storage persisted as one JSON object on disk

use super::KeyValueStore;
use crate::Result;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key/value storage backed by a JSON file
///
/// The whole map is loaded on open and rewritten on every change. A missing,
/// unreadable or garbled file reads as empty; it is replaced on the next write.
/// The in-memory map only changes once the file has been written.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path` without creating it
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        debug!(path = %path.display(), keys = entries.len(), "Opened session store");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(entries)?;
        {
            let mut file = create_private(&tmp)?;
            file.write_all(&body)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let Ok(body) = fs::read(path) else {
        return BTreeMap::new();
    };
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Session store is unreadable, starting empty");
        BTreeMap::new()
    })
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        for (key, value) in pairs {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        for key in keys {
            next.remove(*key);
        }
        if next.len() == entries.len() && !self.path.exists() {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path);
        store
            .set_many(&[("accessToken", "A"), ("refreshToken", "R")])
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("accessToken").as_deref(), Some("A"));
        assert_eq!(reopened.get("refreshToken").as_deref(), Some("R"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_garbled_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("user").is_none());

        store.set("user", "{}").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn test_remove_on_missing_file_does_not_create_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.remove_many(&["user", "accessToken"]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.set("user", "u").unwrap();
        store.remove("user").unwrap();

        assert!(FileStore::open(&path).get("user").is_none());
    }

    #[test]
    fn test_failed_write_keeps_memory_and_disk_in_step() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store
            .set_many(&[("accessToken", "A"), ("refreshToken", "R")])
            .unwrap();

        // A directory where the temp file goes makes every write fail
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.remove_many(&["accessToken", "refreshToken"]).is_err());
        assert_eq!(store.get("accessToken").as_deref(), Some("A"));
        assert_eq!(FileStore::open(&path).get("accessToken").as_deref(), Some("A"));

        assert!(store.set("accessToken", "B").is_err());
        assert_eq!(store.get("accessToken").as_deref(), Some("A"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        FileStore::open(&path).set("accessToken", "A").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

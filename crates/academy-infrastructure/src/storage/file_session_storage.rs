//! Durable session storage on the local filesystem.
//!
//! Each key (`token`, `user`) is its own owner-only file in the session
//! directory, so a crash can leave at most one key stale. The session store
//! already treats a lone key as no session.

use super::atomic_file::AtomicFile;
use academy_core::session::SessionStorage;
use academy_core::{AcademyError, Result};
use std::path::{Path, PathBuf};

/// File-backed [`SessionStorage`].
///
/// Responsibilities:
/// - Map a storage key to a file under the session directory
/// - Write values atomically with mode 600
///
/// Does NOT:
/// - Interpret the stored values
/// - Encrypt anything (plaintext, protected by file permissions only)
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AcademyError::storage(format!("Invalid storage key: {key:?}")));
        }
        Ok(AtomicFile::new(self.dir.join(key)).private())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.file_for(key)?.read()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file_for(key)?.write(value)?;
        tracing::debug!(key, "Persisted session key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file_for(key)?.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::session::{TOKEN_KEY, USER_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp_dir.path().join("session"));

        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
        storage.set(TOKEN_KEY, "tok-123").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-123"));
        assert!(storage.get(USER_KEY).unwrap().is_none());

        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp_dir.path().to_path_buf());
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get("").is_err());
    }
}

//! JSON file-backed storage

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Result, Storage};
use crate::error::StorageError;

/// Storage persisted as a single JSON object on disk.
///
/// Every read goes to the file and every mutation is a read-modify-write of
/// the current file contents, so other `actctl` processes sharing the file
/// are seen immediately. Mutations are serialized within a process only;
/// there is no cross-process file lock.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Storage at `path`; a missing or unreadable file reads as empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("Failed to read session file {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!(
                "Session file {} is not valid JSON, starting empty: {}",
                path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_error(&self, reason: impl ToString) -> StorageError {
        StorageError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|e| self.write_error(e))?;
        std::fs::write(&self.path, contents).map_err(|e| self.write_error(e))?;

        // Session tokens are credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.write_error(e))?;
        }

        Ok(())
    }

    /// Apply `change` to the file's current entries and write them back
    fn mutate(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = Self::load(&self.path);
        let mut next = current.clone();
        change(&mut next);
        if next == current {
            return Ok(());
        }
        self.persist(&next)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::load(&self.path).remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.mutate(BTreeMap::clear)
    }
}

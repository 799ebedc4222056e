//! Persistent key-value storage for session state
//!
//! The [`Storage`] trait is the port the session layer writes through. The
//! on-disk store is [`FileStorage`]; `MemoryStorage` backs tests and
//! [`DetachedStorage`] is used when there is no home directory to persist into.

#[cfg(test)]
use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::RwLock;

use crate::error::StorageError;

mod file;

pub use file::FileStorage;

type Result<T> = std::result::Result<T, StorageError>;

/// Key-value storage port.
///
/// Reads never fail: a missing or unreadable entry is simply absent.
/// Writes report failures so callers can keep related keys consistent.
pub trait Storage: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every value
    fn clear(&self) -> Result<()>;
}

/// In-process storage for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        Ok(())
    }
}

/// Storage with nowhere to persist to.
///
/// Every read is absent and every write is accepted and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStorage;

impl Storage for DetachedStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

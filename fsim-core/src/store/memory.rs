//! In-memory backing store.

use std::collections::HashMap;

use super::backing::BackingStore;
use crate::error::SimResult;

/// Simple in-memory backing store for tests and headless use.
#[derive(Default, Clone)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial files.
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        let files = files.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self { files }
    }

    /// Add a file (convenience method).
    pub fn add_file(&mut self, name: &str, data: impl Into<Vec<u8>>) {
        self.files.insert(name.to_string(), data.into());
    }
}

impl BackingStore for MemoryStore {
    fn read_file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.get(name).cloned()
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> SimResult<()> {
        self.files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn append_file(&mut self, name: &str, data: &[u8]) -> SimResult<()> {
        self.files
            .entry(name.to_string())
            .or_default()
            .extend_from_slice(data);
        Ok(())
    }

    fn remove_file(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

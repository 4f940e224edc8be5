//! Disk-backed store rooted at the simulation directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::backing::BackingStore;
use crate::error::SimResult;

/// Backing store over real files inside one root directory. The root
/// must exist; files are created as needed.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the simulation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BackingStore for DiskStore {
    fn read_file(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.path(name)).ok()
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> SimResult<()> {
        fs::write(self.path(name), data)?;
        Ok(())
    }

    fn append_file(&mut self, name: &str, data: &[u8]) -> SimResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(name))?;
        file.write_all(data)?;
        Ok(())
    }

    fn remove_file(&mut self, name: &str) -> bool {
        fs::remove_file(self.path(name)).is_ok()
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::new(dir.path());

        assert_eq!(store.read_file("0"), None);
        store.write_file("0", &[1, 2, 3]).unwrap();
        assert!(store.exists("0"));
        assert_eq!(store.read_file("0"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_append_creates_then_extends() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::new(dir.path());

        store.append_file("inodes_list", &[1, 2]).unwrap();
        store.append_file("inodes_list", &[3]).unwrap();
        assert_eq!(store.read_file("inodes_list"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_remove_file() {
        let dir = TempDir::new().unwrap();
        let mut store = DiskStore::new(dir.path());

        store.write_file("5", &[]).unwrap();
        assert!(store.remove_file("5"));
        assert!(!store.exists("5"));
        assert!(!store.remove_file("5"));
    }
}

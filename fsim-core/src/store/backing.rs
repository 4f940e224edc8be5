//! BackingStore trait - flat-file interface for the simulated tree.

use crate::error::SimResult;

/// Storage interface for the simulation's backing files: the inode
/// table file plus one file per directory, named by decimal inode
/// index. File names never contain path separators.
pub trait BackingStore {
    /// Read whole file content. Returns None if the file does not exist.
    fn read_file(&self, name: &str) -> Option<Vec<u8>>;

    /// Create or replace a file with the given content.
    fn write_file(&mut self, name: &str, data: &[u8]) -> SimResult<()>;

    /// Append to a file, creating it if absent.
    fn append_file(&mut self, name: &str, data: &[u8]) -> SimResult<()>;

    /// Remove a file. Returns true if it existed.
    fn remove_file(&mut self, name: &str) -> bool;

    /// Check if the file exists.
    fn exists(&self, name: &str) -> bool;
}

//! Simulator - the state machine over the current-working-directory
//! context.
//!
//! Owns the backing store, the inode table (loaded once at open), and
//! the single active directory (reloaded on every successful `cd`).
//! Directory mutations are write-through, so nothing but the inode
//! table needs flushing at exit.

use crate::codec::InodeKind;
use crate::directory::{Directory, Entry};
use crate::error::{SimError, SimResult};
use crate::inode::{InodeTable, ROOT_INODE};
use crate::store::BackingStore;

/// A simulation session over one backing store.
pub struct Simulator<S: BackingStore> {
    store: S,
    table: InodeTable,
    /// Table length at open; persist appends everything past it.
    session_start: usize,
    cwd: Directory,
}

impl<S: BackingStore> Simulator<S> {
    /// Open a session: load the inode table once, then the root
    /// directory. A fresh simulation (no root backing file yet) gets an
    /// empty one created.
    pub fn open(mut store: S) -> SimResult<Self> {
        let table = InodeTable::load(&store)?;
        let session_start = table.loaded_len();
        if !store.exists(&ROOT_INODE.to_string()) {
            store.write_file(&ROOT_INODE.to_string(), &[])?;
        }
        let cwd = Directory::load(&store, ROOT_INODE)?;
        Ok(Self {
            store,
            table,
            session_start,
            cwd,
        })
    }

    /// Entries of the active directory, in on-disk order.
    pub fn list(&self) -> &[Entry] {
        self.cwd.entries()
    }

    /// The active directory context.
    pub fn cwd(&self) -> &Directory {
        &self.cwd
    }

    /// The inode table (read-only, for the debug dumps).
    pub fn inodes(&self) -> &InodeTable {
        &self.table
    }

    /// Change the working directory to a child named `name`.
    ///
    /// Fails `NotFound` if no entry matches and `NotADirectory` if the
    /// entry's inode is a file; in both cases the context is unchanged.
    /// The context is only replaced once the target's entry list has
    /// loaded. Ascending via `..` uses the on-disk entry like any other
    /// name.
    pub fn change_dir(&mut self, name: &str) -> SimResult<()> {
        let entry = self
            .cwd
            .lookup(name)
            .ok_or_else(|| SimError::NotFound(name.to_string()))?;
        let target = entry.inode;
        match self.table.kind_of(target) {
            Some(InodeKind::Directory) => {}
            Some(InodeKind::File) => return Err(SimError::NotADirectory(name.to_string())),
            // Entry points at an inode the table never loaded.
            None => return Err(SimError::NotFound(name.to_string())),
        }

        self.cwd = Directory::load(&self.store, target)?;
        Ok(())
    }

    /// Create a directory child in the active directory (write-through).
    pub fn make_dir(&mut self, name: &str) -> SimResult<u32> {
        self.cwd
            .create_child(&mut self.store, &mut self.table, name, InodeKind::Directory)
    }

    /// Create a file child in the active directory (write-through, no
    /// self-file: files carry no child entries).
    pub fn touch(&mut self, name: &str) -> SimResult<u32> {
        self.cwd
            .create_child(&mut self.store, &mut self.table, name, InodeKind::File)
    }

    /// Persist the inodes created this session. Called once, at exit;
    /// directories were already flushed write-through.
    pub fn persist(&mut self) -> SimResult<()> {
        self.table.persist(&mut self.store, self.session_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn open_fresh() -> Simulator<MemoryStore> {
        Simulator::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_fresh_session_mkdir_cd_ls() {
        // Empty inodes_list, root with zero entries.
        let mut sim = open_fresh();
        assert!(sim.list().is_empty());

        sim.make_dir("a").unwrap();
        sim.change_dir("a").unwrap();

        let names: Vec<_> = sim.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, [".", ".."]);
        assert_eq!(sim.cwd().inode(), 1);
        assert_eq!(sim.cwd().name(), "1");
    }

    #[test]
    fn test_cd_missing_leaves_cwd_unchanged() {
        let mut sim = open_fresh();
        sim.make_dir("a").unwrap();

        let err = sim.change_dir("missing").unwrap_err();
        assert!(matches!(err, SimError::NotFound(name) if name == "missing"));
        assert_eq!(sim.cwd().inode(), ROOT_INODE);
    }

    #[test]
    fn test_cd_into_file_fails() {
        let mut sim = open_fresh();
        sim.touch("notes").unwrap();

        let err = sim.change_dir("notes").unwrap_err();
        assert!(matches!(err, SimError::NotADirectory(name) if name == "notes"));
        assert_eq!(sim.cwd().inode(), ROOT_INODE);
    }

    #[test]
    fn test_cd_then_dotdot_returns_to_origin() {
        let mut sim = open_fresh();
        sim.make_dir("a").unwrap();
        sim.change_dir("a").unwrap();
        sim.make_dir("b").unwrap();

        let before = sim.cwd().inode();
        sim.change_dir("b").unwrap();
        sim.change_dir("..").unwrap();
        assert_eq!(sim.cwd().inode(), before);

        sim.change_dir("..").unwrap();
        assert_eq!(sim.cwd().inode(), ROOT_INODE);
    }

    #[test]
    fn test_cd_dotdot_from_root_fails() {
        // The root carries no self entries by design.
        let mut sim = open_fresh();
        let err = sim.change_dir("..").unwrap_err();
        assert!(matches!(err, SimError::NotFound(_)));
    }

    #[test]
    fn test_mkdir_duplicate_reports_exists() {
        let mut sim = open_fresh();
        sim.make_dir("dup").unwrap();
        let count = sim.list().len();

        let err = sim.make_dir("dup").unwrap_err();
        assert!(matches!(err, SimError::AlreadyExists(_)));
        assert_eq!(sim.list().len(), count);
    }

    #[test]
    fn test_mkdir_after_budget_exhausted_fails_clean() {
        let mut sim = open_fresh();
        // Drain the budget directly; packing one directory would hit
        // the per-directory coupling limit first.
        while sim.table.remaining() > 0 {
            sim.table.allocate(InodeKind::File).unwrap();
        }
        let table_len = sim.inodes().len();
        let entries = sim.list().len();

        let err = sim.make_dir("one_more").unwrap_err();
        assert!(matches!(err, SimError::OutOfInodes));
        assert_eq!(sim.inodes().len(), table_len);
        assert_eq!(sim.list().len(), entries);
    }

    #[test]
    fn test_entry_count_never_exceeds_remaining_budget() {
        let mut sim = open_fresh();
        for i in 0..600 {
            match sim.touch(&format!("f{i}")) {
                Ok(_) => {}
                Err(SimError::DirectoryFull(..)) => break,
                Err(err) => panic!("unexpected error: {err}"),
            }
            assert!(sim.list().len() <= sim.inodes().remaining());
        }
        assert!(sim.list().len() <= sim.inodes().remaining());
    }

    #[test]
    fn test_nested_tree_round_trip() {
        let mut sim = open_fresh();
        sim.make_dir("a").unwrap();
        sim.change_dir("a").unwrap();
        sim.make_dir("b").unwrap();
        sim.change_dir("b").unwrap();
        sim.touch("deep").unwrap();

        sim.change_dir("..").unwrap();
        assert!(sim.cwd().lookup("b").is_some());
        sim.change_dir("..").unwrap();
        assert!(sim.cwd().lookup("a").is_some());
        assert_eq!(sim.cwd().inode(), ROOT_INODE);
    }

    #[test]
    fn test_persist_then_reopen_same_store() {
        let mut sim = open_fresh();
        sim.make_dir("kept").unwrap();
        sim.touch("file").unwrap();
        sim.persist().unwrap();

        // Simulate a second process over the same backing files.
        let store = {
            // Move the store out by rebuilding a session on a clone.
            sim.store.clone()
        };
        let mut sim2 = Simulator::open(store).unwrap();
        assert_eq!(sim2.inodes().len(), 3);
        assert_eq!(sim2.inodes().loaded_len(), 3);
        sim2.change_dir("kept").unwrap();
        let names: Vec<_> = sim2.list().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, [".", ".."]);
    }
}

//! Directory store - one directory's entry list, plus the CWD context.
//!
//! Each directory is backed by a flat file named by the decimal
//! rendering of its own inode index, holding 36-byte entry records in
//! insertion order. Every non-root directory's file starts with its
//! two self entries: `.` pointing at itself and `..` pointing at its
//! parent. The root (inode 0) carries no self entries.
//!
//! Mutations are write-through: `create_child` flushes to the backing
//! files immediately, so a directory can be discarded on `cd` without
//! a second flush.

use crate::codec::{self, InodeKind};
use crate::error::{SimError, SimResult};
use crate::inode::InodeTable;
use crate::store::BackingStore;

/// A directory-listing record: child inode index plus bounded name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub inode: u32,
    pub name: String,
}

/// The active directory: its inode, backing file name, and loaded
/// entry list. Only one directory is materialized at a time.
pub struct Directory {
    inode: u32,
    name: String,
    entries: Vec<Entry>,
    trailing: usize,
}

impl Directory {
    /// Load a directory's entry list from its backing file.
    ///
    /// Fails `NotFound` if the file does not exist; an existing empty
    /// file is an empty directory, which is distinct.
    pub fn load<S: BackingStore>(store: &S, inode: u32) -> SimResult<Self> {
        let name = inode.to_string();
        let bytes = store
            .read_file(&name)
            .ok_or_else(|| SimError::NotFound(name.clone()))?;
        let decoded = codec::read_entry_records(&bytes);

        let entries = decoded
            .records
            .into_iter()
            .map(|(inode, name)| Entry { inode, name })
            .collect();

        Ok(Self {
            inode,
            name,
            entries,
            trailing: decoded.trailing,
        })
    }

    /// Inode index of this directory.
    pub fn inode(&self) -> u32 {
        self.inode
    }

    /// Backing file name (decimal inode index).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Occupied entries in on-disk (insertion) order, unsorted.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes dropped at end-of-stream during load (diagnostic).
    pub fn trailing(&self) -> usize {
        self.trailing
    }

    /// First exact case-sensitive match; None only after scanning the
    /// whole entry list.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Create a child of this directory with the given kind.
    ///
    /// Fails `AlreadyExists` on a name collision, `OutOfInodes` when
    /// the filesystem-wide budget is exhausted, and `DirectoryFull`
    /// when one more entry would outgrow the remaining budget — all
    /// before anything is written. For a directory child, writes the
    /// child's backing file
    /// with exactly `(child, ".")` then `(parent, "..")`; a file child
    /// gets no backing file. Then appends one entry to this directory's
    /// backing file and updates the in-memory list. If the parent
    /// append fails, the child's backing file is removed again so the
    /// operation leaves no partial state behind.
    pub fn create_child<S: BackingStore>(
        &mut self,
        store: &mut S,
        table: &mut InodeTable,
        name: &str,
        kind: InodeKind,
    ) -> SimResult<u32> {
        let name = codec::truncate_name(name);
        if self.lookup(name).is_some() {
            return Err(SimError::AlreadyExists(name.to_string()));
        }
        let remaining = table.remaining();
        if remaining == 0 {
            return Err(SimError::OutOfInodes);
        }
        // Every child consumes one global inode slot, so a directory
        // may never hold more live entries than slots remain to fill
        // them. Check the post-insert state.
        if self.entries.len() + 1 > remaining - 1 {
            return Err(SimError::DirectoryFull(self.entries.len(), remaining));
        }

        let child = table.next_index();
        let child_name = child.to_string();

        if kind == InodeKind::Directory {
            let mut self_file = Vec::with_capacity(2 * codec::ENTRY_RECORD_SIZE);
            self_file.extend_from_slice(&codec::encode_entry(child, "."));
            self_file.extend_from_slice(&codec::encode_entry(self.inode, ".."));
            store.write_file(&child_name, &self_file)?;
        }

        let record = codec::encode_entry(child, name);
        if let Err(err) = store.append_file(&self.name, &record) {
            if kind == InodeKind::Directory {
                store.remove_file(&child_name);
            }
            return Err(err);
        }

        // Cannot fail: remaining() was checked above.
        let allocated = table.allocate(kind)?;
        debug_assert_eq!(allocated, child);

        self.entries.push(Entry {
            inode: child,
            name: name.to_string(),
        });
        Ok(child)
    }
}

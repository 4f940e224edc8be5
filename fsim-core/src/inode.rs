//! Inode table - the global registry of simulated filesystem objects.
//!
//! Backed by the flat `inodes_list` file, a concatenation of 5-byte
//! records. Indices are assigned monotonically starting at 0 (the
//! simulation root) and are never reused. The table grows only via
//! allocation and is persisted once, at exit, by appending the records
//! created during the session.

use crate::codec::{self, InodeKind};
use crate::error::{SimError, SimResult};
use crate::store::BackingStore;

/// Backing file name of the inode table.
pub const INODES_LIST: &str = "inodes_list";

/// Maximum number of inodes in the simulation. Bounds both the table
/// and, through the remaining budget, any single directory's entry
/// count.
pub const MAX_INODES: usize = 1024;

/// Inode index of the simulation root directory.
pub const ROOT_INODE: u32 = 0;

/// A simulated filesystem object record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inode {
    pub index: u32,
    pub kind: InodeKind,
}

/// The inode table. Slot position equals inode index; absent slots do
/// not exist (no sentinels).
pub struct InodeTable {
    slots: Vec<Inode>,
    /// Records read from the backing file at load time. Slots past this
    /// point were created this session and are the ones persisted.
    loaded: usize,
    /// Trailing bytes dropped at end-of-stream during load.
    trailing: usize,
}

impl InodeTable {
    /// Load the table from `inodes_list`, stopping at EOF or capacity.
    ///
    /// An empty or missing backing file means a fresh simulation: the
    /// root directory inode is seeded in memory (and written out with
    /// the session's records at exit). Fails `CapacityExceeded` when
    /// the loaded count reaches `MAX_INODES - 1`; the table is
    /// considered unsafe to grow further.
    pub fn load<S: BackingStore>(store: &S) -> SimResult<Self> {
        let bytes = store.read_file(INODES_LIST).unwrap_or_default();
        let decoded = codec::read_inode_records(&bytes)?;

        let mut slots: Vec<Inode> = decoded
            .records
            .into_iter()
            .take(MAX_INODES)
            .map(|(index, kind)| Inode { index, kind })
            .collect();
        if slots.len() >= MAX_INODES - 1 {
            return Err(SimError::CapacityExceeded(slots.len()));
        }

        let loaded = slots.len();
        if slots.is_empty() {
            slots.push(Inode {
                index: ROOT_INODE,
                kind: InodeKind::Directory,
            });
        }

        Ok(Self {
            slots,
            loaded,
            trailing: decoded.trailing,
        })
    }

    /// Number of occupied slots. Also the next index to allocate.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of records that came from the backing file at load time.
    pub fn loaded_len(&self) -> usize {
        self.loaded
    }

    /// Bytes dropped at end-of-stream during load (diagnostic).
    pub fn trailing(&self) -> usize {
        self.trailing
    }

    /// Filesystem-wide remaining-inode budget.
    pub fn remaining(&self) -> usize {
        MAX_INODES - self.slots.len()
    }

    /// Index the next allocation will receive.
    pub fn next_index(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Kind of the inode at `index`, if it exists.
    pub fn kind_of(&self, index: u32) -> Option<InodeKind> {
        self.slots.get(index as usize).map(|inode| inode.kind)
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Inode> {
        self.slots.iter()
    }

    /// Allocate the next inode. Fails `OutOfInodes` when the budget is
    /// exhausted; callers must check before writing any records.
    pub fn allocate(&mut self, kind: InodeKind) -> SimResult<u32> {
        if self.remaining() == 0 {
            return Err(SimError::OutOfInodes);
        }
        let index = self.next_index();
        self.slots.push(Inode { index, kind });
        Ok(index)
    }

    /// Append every occupied slot from `starting_index` to the end of
    /// the table to the backing file. Called once, at exit.
    pub fn persist<S: BackingStore>(&self, store: &mut S, starting_index: usize) -> SimResult<()> {
        let mut bytes = Vec::new();
        for inode in &self.slots[starting_index.min(self.slots.len())..] {
            bytes.extend_from_slice(&codec::encode_inode(inode.index, inode.kind));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        store.append_file(INODES_LIST, &bytes)
    }
}

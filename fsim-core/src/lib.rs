//! Simulated Inode Filesystem Core
//!
//! This crate provides the core components of the filesystem simulator:
//! - Fixed-width binary codec for inode and entry records
//! - Inode table backed by the flat `inodes_list` file
//! - Per-directory entry lists backed by one flat file each
//! - The command state machine over the working-directory context
//!
//! # Architecture
//!
//! The simulator uses a layered design:
//! - `BackingStore` trait: flat-file storage (disk or in-memory)
//! - `InodeTable` / `Directory`: the two record stores
//! - `Simulator`: resolves commands against the active directory
//!
//! All I/O is synchronous and single-threaded; exactly one process is
//! assumed to operate on a simulated tree at a time.

pub mod codec;
pub mod command;
pub mod directory;
pub mod error;
pub mod inode;
pub mod sim;
pub mod store;

pub use codec::{truncate_name, Decoded, InodeKind, ENTRY_RECORD_SIZE, INODE_RECORD_SIZE, NAME_SIZE};
pub use command::Command;
pub use directory::{Directory, Entry};
pub use error::{SimError, SimResult};
pub use inode::{Inode, InodeTable, INODES_LIST, MAX_INODES, ROOT_INODE};
pub use sim::Simulator;
pub use store::{BackingStore, DiskStore, MemoryStore};

//! Backing-store abstractions for the simulator.
//!
//! This module provides the storage seam:
//! - `BackingStore`: flat-file interface the core operates on
//! - `DiskStore`: real files under the simulation root directory
//! - `MemoryStore`: in-memory implementation for tests

mod backing;
mod disk;
mod memory;

pub use backing::BackingStore;
pub use disk::DiskStore;
pub use memory::MemoryStore;

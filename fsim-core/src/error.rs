//! Error types for the filesystem simulator.

use thiserror::Error;

/// Errors that can occur during a simulation session.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{0}: Not a directory")]
    NotADirectory(String),

    #[error("{0}: File exists")]
    AlreadyExists(String),

    #[error("no free inodes left")]
    OutOfInodes,

    #[error("no space left for another entry ({0} entries, {1} inodes remaining)")]
    DirectoryFull(usize, usize),

    #[error("inode table loaded {0} records, at capacity")]
    CapacityExceeded(usize),

    #[error("unknown inode kind tag 0x{0:02x}")]
    UnknownKind(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;

//! Interactive command classification.
//!
//! Maps the first word of an input line to a command. Anything
//! unrecognized is `Unknown`; the surface answers it with a generic
//! message and changes no state.

/// Commands understood by the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `ls`: list the active directory
    Ls,
    /// `cd <name>`: change the working directory
    Cd,
    /// `mkdir <name>`: create a directory child
    Mkdir,
    /// `touch <name>`: create a file child
    Touch,
    /// `exit`: persist the session's inodes and quit
    Exit,
    /// `e_ilist`: dump the whole inode table
    DumpInodes,
    /// `e_ninodes`: dump the first ten inode slots
    DumpInodesHead,
    /// `e_dir`: dump the active directory's entries
    DumpDir,
    /// `e_nitems`: dump the first ten entries
    DumpDirHead,
    /// Anything else
    Unknown,
}

impl Command {
    /// Classify a command word.
    pub fn parse(word: &str) -> Self {
        match word {
            "ls" => Self::Ls,
            "cd" => Self::Cd,
            "mkdir" => Self::Mkdir,
            "touch" => Self::Touch,
            "exit" => Self::Exit,
            "e_ilist" => Self::DumpInodes,
            "e_ninodes" => Self::DumpInodesHead,
            "e_dir" => Self::DumpDir,
            "e_nitems" => Self::DumpDirHead,
            _ => Self::Unknown,
        }
    }
}

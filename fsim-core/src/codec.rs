//! Fixed-width record codec for the backing files.
//!
//! Two record formats, no headers, no versioning:
//!
//! Inode record (5 bytes):
//! - Bytes 0-3: inode index (little-endian u32)
//! - Byte 4: kind tag (`b'd'` or `b'f'`)
//!
//! Entry record (36 bytes):
//! - Bytes 0-3: child inode index (little-endian u32)
//! - Bytes 4-35: name, NUL-padded to 32 bytes
//!
//! Decoding stops cleanly at end of stream. A record shorter than its
//! fixed width at the tail is dropped, not an error; the dropped byte
//! count is reported through [`Decoded::trailing`] so callers can
//! surface it.

use crate::error::{SimError, SimResult};

/// Size of an inode record in bytes.
pub const INODE_RECORD_SIZE: usize = 5;

/// Size of a directory entry record in bytes.
pub const ENTRY_RECORD_SIZE: usize = 36;

/// Maximum name length in bytes (fixed field width).
pub const NAME_SIZE: usize = 32;

/// Kind of a simulated filesystem object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InodeKind {
    Directory = b'd',
    File = b'f',
}

impl InodeKind {
    /// On-disk tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for InodeKind {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'd' => Ok(Self::Directory),
            b'f' => Ok(Self::File),
            other => Err(SimError::UnknownKind(other)),
        }
    }
}

/// Records decoded from a byte stream, plus the count of trailing bytes
/// that did not form a whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub trailing: usize,
}

/// Encode one inode record.
pub fn encode_inode(index: u32, kind: InodeKind) -> [u8; INODE_RECORD_SIZE] {
    let mut rec = [0u8; INODE_RECORD_SIZE];
    rec[..4].copy_from_slice(&index.to_le_bytes());
    rec[4] = kind.tag();
    rec
}

/// Decode one inode record. Rejects unknown kind tags.
pub fn decode_inode(rec: &[u8; INODE_RECORD_SIZE]) -> SimResult<(u32, InodeKind)> {
    let index = u32::from_le_bytes([rec[0], rec[1], rec[2], rec[3]]);
    let kind = InodeKind::try_from(rec[4])?;
    Ok((index, kind))
}

/// Encode one directory entry record. Names longer than 32 bytes are
/// truncated; shorter names are NUL-padded.
pub fn encode_entry(child: u32, name: &str) -> [u8; ENTRY_RECORD_SIZE] {
    let mut rec = [0u8; ENTRY_RECORD_SIZE];
    rec[..4].copy_from_slice(&child.to_le_bytes());
    let name = truncate_name(name).as_bytes();
    rec[4..4 + name.len()].copy_from_slice(name);
    rec
}

/// Decode one directory entry record. The name is read up to the first
/// NUL in the fixed field.
pub fn decode_entry(rec: &[u8; ENTRY_RECORD_SIZE]) -> (u32, String) {
    let child = u32::from_le_bytes([rec[0], rec[1], rec[2], rec[3]]);
    let field = &rec[4..];
    let end = field.iter().position(|&b| b == 0).unwrap_or(NAME_SIZE);
    let name = String::from_utf8_lossy(&field[..end]).into_owned();
    (child, name)
}

/// Decode all inode records from a byte stream.
pub fn read_inode_records(bytes: &[u8]) -> SimResult<Decoded<(u32, InodeKind)>> {
    let mut records = Vec::new();
    let mut chunks = bytes.chunks_exact(INODE_RECORD_SIZE);
    for chunk in &mut chunks {
        let rec: &[u8; INODE_RECORD_SIZE] = chunk.try_into().unwrap();
        records.push(decode_inode(rec)?);
    }
    Ok(Decoded {
        records,
        trailing: chunks.remainder().len(),
    })
}

/// Decode all entry records from a byte stream.
pub fn read_entry_records(bytes: &[u8]) -> Decoded<(u32, String)> {
    let mut records = Vec::new();
    let mut chunks = bytes.chunks_exact(ENTRY_RECORD_SIZE);
    for chunk in &mut chunks {
        let rec: &[u8; ENTRY_RECORD_SIZE] = chunk.try_into().unwrap();
        records.push(decode_entry(rec));
    }
    Decoded {
        records,
        trailing: chunks.remainder().len(),
    }
}

/// Truncate a name to at most 32 bytes, on a char boundary.
pub fn truncate_name(name: &str) -> &str {
    if name.len() <= NAME_SIZE {
        return name;
    }
    let mut end = NAME_SIZE;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inode_round_trip() {
        let rec = encode_inode(42, InodeKind::Directory);
        assert_eq!(rec, [42, 0, 0, 0, b'd']);
        assert_eq!(decode_inode(&rec).unwrap(), (42, InodeKind::Directory));

        let rec = encode_inode(0x01020304, InodeKind::File);
        assert_eq!(decode_inode(&rec).unwrap(), (0x01020304, InodeKind::File));
    }

    #[test]
    fn test_inode_unknown_tag_rejected() {
        let rec = [1, 0, 0, 0, b'x'];
        match decode_inode(&rec) {
            Err(SimError::UnknownKind(b'x')) => {}
            other => panic!("expected UnknownKind, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_round_trip() {
        let rec = encode_entry(7, "docs");
        assert_eq!(&rec[..4], &[7, 0, 0, 0]);
        assert_eq!(rec[4..8], *b"docs");
        assert!(rec[8..].iter().all(|&b| b == 0));
        assert_eq!(decode_entry(&rec), (7, "docs".to_string()));
    }

    #[test]
    fn test_entry_name_exactly_32_bytes() {
        let name = "a".repeat(32);
        let rec = encode_entry(1, &name);
        assert_eq!(decode_entry(&rec), (1, name));
    }

    #[test]
    fn test_entry_name_truncated_on_encode() {
        let name = "b".repeat(40);
        let rec = encode_entry(1, &name);
        assert_eq!(decode_entry(&rec), (1, "b".repeat(32)));
    }

    #[test]
    fn test_truncate_name_char_boundary() {
        // 31 ASCII bytes plus a 2-byte char would split at byte 32
        let name = format!("{}é", "a".repeat(31));
        assert_eq!(truncate_name(&name), "a".repeat(31));
    }

    #[test]
    fn test_read_inode_records_clean_eof() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_inode(0, InodeKind::Directory));
        bytes.extend_from_slice(&encode_inode(1, InodeKind::File));

        let decoded = read_inode_records(&bytes).unwrap();
        assert_eq!(
            decoded.records,
            vec![(0, InodeKind::Directory), (1, InodeKind::File)]
        );
        assert_eq!(decoded.trailing, 0);
    }

    #[test]
    fn test_read_inode_records_short_tail_dropped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_inode(0, InodeKind::Directory));
        bytes.extend_from_slice(&[9, 0, 0]); // truncated record

        let decoded = read_inode_records(&bytes).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.trailing, 3);
    }

    #[test]
    fn test_read_entry_records_short_tail_dropped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_entry(2, "x"));
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);

        let decoded = read_entry_records(&bytes);
        assert_eq!(decoded.records, vec![(2, "x".to_string())]);
        assert_eq!(decoded.trailing, 5);
    }

    #[test]
    fn test_read_entry_records_empty_stream() {
        let decoded = read_entry_records(&[]);
        assert!(decoded.records.is_empty());
        assert_eq!(decoded.trailing, 0);
    }
}

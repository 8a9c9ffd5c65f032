//! Binary layout of GNU gettext `.mo` catalogs.
//!
//! ```text
//! Offset  Size  Field
//! 0x00    4     magic: 0x950412de, or 0xde120495 when the file was written big-endian
//! 0x04    4     revision: major << 16 | minor
//! 0x08    4     N: number of string pairs
//! 0x0C    4     O: offset of the original string descriptor table
//! 0x10    4     T: offset of the translation string descriptor table
//! 0x14    4     S: size of the hash table
//! 0x18    4     H: offset of the hash table
//! O + i*8 8     original descriptor i: (length, offset)
//! T + i*8 8     translation descriptor i: (length, offset)
//! ```
//!
//! Strings are NUL-terminated runs; the descriptor length excludes the NUL.
//! Integers are read as little-endian and byte-swapped when the magic number
//! only matches in the opposite order.

use crate::error::{LoadError, LoadResult, StringTable};

/// Magic number as it reads from a catalog written in our byte order.
pub const MAGIC: u32 = 0x950412de;

/// Magic number as it reads from a catalog written in the opposite byte order.
pub const MAGIC_SWAPPED: u32 = 0xde120495;

/// Fixed header size in bytes.
pub const HEADER_LEN: usize = 28;

/// Highest major revision this reader understands.
pub const MAX_MAJOR_REVISION: u16 = 1;

/// Size of one (length, offset) entry in a descriptor table.
pub const DESCRIPTOR_LEN: usize = 8;

/// Byte that separates msgctxt from msgid in an original string.
pub const CONTEXT_SEPARATOR: u8 = 0x04;

/// Reads 4-byte words from a catalog buffer, swapping when the buffer's byte
/// order differs from the one the header was first read in.
#[derive(Debug, Clone, Copy)]
pub struct WordReader<'a> {
    data: &'a [u8],
    swap: bool,
}

impl<'a> WordReader<'a> {
    pub fn new(data: &'a [u8], swap: bool) -> Self {
        WordReader { data, swap }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read the word at `pos`, or `None` if fewer than 4 bytes remain.
    pub fn read_u32(&self, pos: usize) -> Option<u32> {
        let end = pos.checked_add(4)?;
        let bytes: [u8; 4] = self.data.get(pos..end)?.try_into().ok()?;
        let value = u32::from_le_bytes(bytes);
        Some(if self.swap { value.swap_bytes() } else { value })
    }
}

/// The fixed 28-byte header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Whether every integer in the buffer must be byte-swapped
    pub swap: bool,
    pub major: u16,
    pub minor: u16,
    pub string_count: u32,
    pub originals_offset: u32,
    pub translations_offset: u32,
    pub hash_table_size: u32,
    pub hash_table_offset: u32,
}

impl Header {
    /// Validate and decode the header at the start of `data`.
    pub fn read_from(data: &[u8]) -> LoadResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(LoadError::TooSmall {
                len: data.len(),
                header_len: HEADER_LEN,
            });
        }

        let raw_magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let swap = match raw_magic {
            MAGIC => false,
            MAGIC_SWAPPED => true,
            other => return Err(LoadError::BadMagic(other)),
        };

        let words = WordReader::new(data, swap);
        // All offsets below are inside the header length checked above.
        let word = |pos: usize| words.read_u32(pos).unwrap_or_default();

        let revision = word(4);
        let major = (revision >> 16) as u16;
        let minor = (revision & 0xffff) as u16;
        if major > MAX_MAJOR_REVISION {
            return Err(LoadError::UnsupportedRevision { major, minor });
        }

        Ok(Header {
            swap,
            major,
            minor,
            string_count: word(8),
            originals_offset: word(12),
            translations_offset: word(16),
            hash_table_size: word(20),
            hash_table_offset: word(24),
        })
    }
}

/// A (length, offset) reference to one string in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDescriptor {
    pub length: u32,
    pub offset: u32,
}

impl StringDescriptor {
    /// Read entry `index` of the descriptor table starting at `table_offset`.
    pub fn read(
        words: &WordReader<'_>,
        table: StringTable,
        table_offset: u32,
        index: u32,
    ) -> LoadResult<Self> {
        let pos = (index as usize)
            .checked_mul(DESCRIPTOR_LEN)
            .and_then(|rel| rel.checked_add(table_offset as usize));
        let entry = pos.and_then(|pos| {
            let length = words.read_u32(pos)?;
            let offset = words.read_u32(pos.checked_add(4)?)?;
            Some((length, offset))
        });

        match entry {
            Some((length, offset)) => Ok(StringDescriptor { length, offset }),
            None => Err(LoadError::OutOfBoundsDescriptor {
                table,
                index,
                offset: u64::from(table_offset) + u64::from(index) * DESCRIPTOR_LEN as u64,
                length: DESCRIPTOR_LEN as u64,
                size: words.data().len(),
            }),
        }
    }

    /// Slice the described string out of `data`.
    ///
    /// The run must end strictly before the last byte of the buffer, leaving
    /// room for its terminating NUL.
    pub fn slice<'a>(
        &self,
        data: &'a [u8],
        table: StringTable,
        index: u32,
    ) -> LoadResult<&'a [u8]> {
        let start = self.offset as usize;
        match start.checked_add(self.length as usize) {
            Some(end) if end < data.len() => Ok(&data[start..end]),
            _ => Err(LoadError::OutOfBoundsDescriptor {
                table,
                index,
                offset: u64::from(self.offset),
                length: u64::from(self.length),
                size: data.len(),
            }),
        }
    }
}

use thiserror::Error;

/// Which half of the catalog a string descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringTable {
    Original,
    Translation,
}

impl std::fmt::Display for StringTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringTable::Original => write!(f, "original"),
            StringTable::Translation => write!(f, "translation"),
        }
    }
}

/// Coarse classification of a [`LoadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad magic, unsupported major revision, or a buffer shorter than the header
    MalformedHeader,
    /// A string descriptor (or its table entry) points outside the buffer
    OutOfBoundsDescriptor,
    /// The byte source could not be opened or read in full
    IoFailure,
}

/// Reasons a catalog load is rejected.
///
/// A rejected load never leaves a partial catalog behind.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("buffer of {len} bytes is smaller than the {header_len}-byte header")]
    TooSmall { len: usize, header_len: usize },

    #[error("bad magic number 0x{0:08x}")]
    BadMagic(u32),

    #[error("unsupported revision {major}.{minor}")]
    UnsupportedRevision { major: u16, minor: u16 },

    #[error(
        "{table} string {index} out of bounds (offset {offset}, length {length}, buffer {size} bytes)"
    )]
    OutOfBoundsDescriptor {
        table: StringTable,
        index: u32,
        offset: u64,
        length: u64,
        size: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::TooSmall { .. }
            | LoadError::BadMagic(_)
            | LoadError::UnsupportedRevision { .. } => ErrorKind::MalformedHeader,
            LoadError::OutOfBoundsDescriptor { .. } => ErrorKind::OutOfBoundsDescriptor,
            LoadError::Io(_) => ErrorKind::IoFailure,
        }
    }
}

/// Result type for catalog loading
pub type LoadResult<T> = Result<T, LoadError>;

#![forbid(unsafe_code)]

//! Reader for GNU gettext binary translation catalogs (`.mo` files).
//!
//! A [`MoReader`] parses a catalog from memory, from any [`std::io::Read`]
//! source, or from a file, and answers lookups by msgid, optionally scoped by
//! msgctxt. Catalogs written in either byte order are accepted.
//!
//! Lookups never fail: a missing msgid yields an empty string, exactly like
//! an entry whose translation is empty.
//!
//! ```no_run
//! use mo_reader::MoReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = MoReader::new();
//! reader.load(&std::fs::read("sv_SE.mo")?)?;
//! assert_eq!(reader.get_translation("Quit"), "Avsluta");
//! assert_eq!(reader.get_translation_with_context("Open", "lowres"), "Öpp");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod format;
pub mod metadata;
pub mod reader;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, context_key};
pub use error::{ErrorKind, LoadError, LoadResult, StringTable};
pub use metadata::{HeaderField, Metadata};
pub use reader::MoReader;

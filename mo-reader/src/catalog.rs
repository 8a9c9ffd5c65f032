//! Immutable translation catalog parsed from one `.mo` buffer.
//!
//! # Invariants
//!
//! 1. **No empty keys**: the record with an empty msgid is the catalog's
//!    metadata header. It is kept aside in [`Catalog::metadata_raw`] and never
//!    enters the lookup map.
//!
//! 2. **All or nothing**: [`Catalog::parse`] either returns a complete catalog
//!    or an error; a partially read table is never observable.
//!
//! 3. **Thread safety**: `Catalog` is `Send + Sync` and is never mutated after
//!    parsing, so a loaded catalog can be shared behind an `Arc` and swapped
//!    wholesale.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{LoadResult, StringTable};
use crate::format::{CONTEXT_SEPARATOR, Header, StringDescriptor, WordReader};
use crate::metadata::Metadata;

/// Build the lookup key for `msgid` in `context`: `context ++ 0x04 ++ msgid`.
pub fn context_key(context: &[u8], msgid: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(context.len() + 1 + msgid.len());
    key.extend_from_slice(context);
    key.push(CONTEXT_SEPARATOR);
    key.extend_from_slice(msgid);
    key
}

/// Original to translated string mapping from one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    strings: HashMap<Vec<u8>, Vec<u8>>,
    metadata: Option<Vec<u8>>,
}

impl Catalog {
    /// Parse a complete `.mo` buffer.
    ///
    /// # Errors
    /// - Buffer shorter than the header, bad magic, or a major revision above 1
    /// - Any descriptor whose string would end at or past the last byte
    pub fn parse(data: &[u8]) -> LoadResult<Self> {
        let header = Header::read_from(data)?;
        let words = WordReader::new(data, header.swap);

        let mut catalog = Catalog {
            strings: HashMap::with_capacity(header.string_count.min(1 << 16) as usize),
            metadata: None,
        };

        for index in 0..header.string_count {
            let original = StringDescriptor::read(
                &words,
                StringTable::Original,
                header.originals_offset,
                index,
            )?
            .slice(data, StringTable::Original, index)?;
            let translation = StringDescriptor::read(
                &words,
                StringTable::Translation,
                header.translations_offset,
                index,
            )?
            .slice(data, StringTable::Translation, index)?;

            if original.is_empty() {
                trace!(index, len = translation.len(), "metadata record");
                catalog.metadata = Some(translation.to_vec());
                continue;
            }

            catalog
                .strings
                .insert(original.to_vec(), translation.to_vec());
        }

        debug!(
            entries = catalog.strings.len(),
            declared = header.string_count,
            swapped = header.swap,
            major = header.major,
            minor = header.minor,
            hash_table_size = header.hash_table_size,
            "parsed .mo catalog"
        );

        Ok(catalog)
    }

    /// Exact-key lookup. Unlike the reader's lookups this tells a miss apart
    /// from an empty translation.
    pub fn lookup(&self, key: &[u8]) -> Option<&[u8]> {
        self.strings.get(key).map(Vec::as_slice)
    }

    /// Lookup of `msgid` in `context`, falling back to the bare msgid.
    pub fn lookup_with_context(&self, msgid: &[u8], context: &[u8]) -> Option<&[u8]> {
        self.lookup(&context_key(context, msgid))
            .or_else(|| self.lookup(msgid))
    }

    /// Number of entries, excluding the metadata record.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over `(key, translation)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.strings
            .iter()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Translation of the empty msgid, if the catalog carried one.
    pub fn metadata_raw(&self) -> Option<&[u8]> {
        self.metadata.as_deref()
    }

    /// Parsed view of the metadata header.
    pub fn metadata(&self) -> Option<Metadata> {
        self.metadata_raw().map(Metadata::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::test_support::MoBuilder;

    #[test]
    fn test_catalog_impls_send_sync() {
        fn check<T: Send + Sync>(_: T) {}
        check(Catalog::default());
    }

    #[test]
    fn test_context_key() {
        assert_eq!(context_key(b"menu", b"Open"), b"menu\x04Open".to_vec());
        assert_eq!(context_key(b"", b"Open"), b"\x04Open".to_vec());
    }

    #[test]
    fn test_parse_simple() {
        let data = MoBuilder::new()
            .entry("Hello", "Hej")
            .entry("World", "Värld")
            .build();
        let catalog = Catalog::parse(&data).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup(b"Hello"), Some(&b"Hej"[..]));
        assert_eq!(catalog.lookup("World".as_bytes()), Some("Värld".as_bytes()));
        assert_eq!(catalog.lookup(b"Missing"), None);
    }

    #[test]
    fn test_metadata_kept_out_of_lookup() {
        let data = MoBuilder::new()
            .metadata("Content-Type: text/plain; charset=UTF-8\n")
            .entry("Yes", "Ja")
            .build();
        let catalog = Catalog::parse(&data).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(b""), None);
        assert_eq!(
            catalog.metadata_raw(),
            Some(&b"Content-Type: text/plain; charset=UTF-8\n"[..])
        );
        assert_eq!(catalog.metadata().unwrap().charset(), Some("UTF-8"));
    }

    #[test]
    fn test_empty_translation_is_present() {
        let data = MoBuilder::new().entry("Untranslated", "").build();
        let catalog = Catalog::parse(&data).unwrap();
        assert_eq!(catalog.lookup(b"Untranslated"), Some(&b""[..]));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let data = MoBuilder::new()
            .unsorted()
            .entry("Save", "Spara")
            .entry("Save", "Lagra")
            .build();
        let catalog = Catalog::parse(&data).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(b"Save"), Some(&b"Lagra"[..]));
    }

    #[test]
    fn test_lookup_with_context() {
        let data = MoBuilder::new()
            .context_entry("verb", "Open", "Öppna")
            .entry("Open", "Öppen")
            .entry("Close", "Stäng")
            .build();
        let catalog = Catalog::parse(&data).unwrap();
        assert_eq!(
            catalog.lookup_with_context("Open".as_bytes(), b"verb"),
            Some("Öppna".as_bytes())
        );
        assert_eq!(
            catalog.lookup_with_context("Open".as_bytes(), b"adjective"),
            Some("Öppen".as_bytes())
        );
        assert_eq!(catalog.lookup_with_context(b"Quit", b"menu"), None);
    }

    #[test]
    fn test_parse_rejects_descriptor_table_past_end() {
        let mut data = MoBuilder::new().entry("a", "b").build();
        // Point the translation table past the end of the buffer.
        let bogus = (data.len() as u32).to_le_bytes();
        data[16..20].copy_from_slice(&bogus);
        assert!(matches!(
            Catalog::parse(&data),
            Err(LoadError::OutOfBoundsDescriptor {
                table: StringTable::Translation,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_iter_yields_all_pairs() {
        let data = MoBuilder::new()
            .entry("one", "ett")
            .entry("two", "två")
            .build();
        let catalog = Catalog::parse(&data).unwrap();
        let mut pairs: Vec<_> = catalog.iter().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                (&b"one"[..], &b"ett"[..]),
                (&b"two"[..], "två".as_bytes())
            ]
        );
    }
}

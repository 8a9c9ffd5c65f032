//! Test-only encoder producing catalogs laid out the way `msgfmt` writes them:
//! header, original table, translation table, then the NUL-terminated
//! originals followed by the translations.

use crate::catalog::context_key;
use crate::format::{DESCRIPTOR_LEN, HEADER_LEN, MAGIC};

#[derive(Debug, Clone)]
pub struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    big_endian: bool,
    sorted: bool,
    revision: u32,
}

impl MoBuilder {
    pub fn new() -> Self {
        MoBuilder {
            entries: Vec::new(),
            big_endian: false,
            sorted: true,
            revision: 0,
        }
    }

    pub fn entry(self, msgid: &str, msgstr: &str) -> Self {
        self.raw_entry(msgid.as_bytes(), msgstr.as_bytes())
    }

    pub fn context_entry(self, context: &str, msgid: &str, msgstr: &str) -> Self {
        let key = context_key(context.as_bytes(), msgid.as_bytes());
        self.raw_entry(&key, msgstr.as_bytes())
    }

    pub fn metadata(self, header: &str) -> Self {
        self.raw_entry(b"", header.as_bytes())
    }

    pub fn raw_entry(mut self, msgid: &[u8], msgstr: &[u8]) -> Self {
        self.entries.push((msgid.to_vec(), msgstr.to_vec()));
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    /// Keep entries in insertion order instead of sorting by msgid.
    pub fn unsorted(mut self) -> Self {
        self.sorted = false;
        self
    }

    pub fn revision(mut self, major: u16, minor: u16) -> Self {
        self.revision = (u32::from(major) << 16) | u32::from(minor);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut entries = self.entries.clone();
        if self.sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let count = entries.len();
        let originals_offset = HEADER_LEN;
        let translations_offset = originals_offset + count * DESCRIPTOR_LEN;
        let strings_offset = translations_offset + count * DESCRIPTOR_LEN;

        let mut original_table = Vec::new();
        let mut translation_table = Vec::new();
        let mut strings = Vec::new();

        for (msgid, _) in &entries {
            original_table.push((msgid.len(), strings_offset + strings.len()));
            strings.extend_from_slice(msgid);
            strings.push(0);
        }
        for (_, msgstr) in &entries {
            translation_table.push((msgstr.len(), strings_offset + strings.len()));
            strings.extend_from_slice(msgstr);
            strings.push(0);
        }

        let mut out = Vec::with_capacity(strings_offset + strings.len());
        let word = |out: &mut Vec<u8>, value: usize| {
            let value = value as u32;
            if self.big_endian {
                out.extend_from_slice(&value.to_be_bytes());
            } else {
                out.extend_from_slice(&value.to_le_bytes());
            }
        };

        word(&mut out, MAGIC as usize);
        word(&mut out, self.revision as usize);
        word(&mut out, count);
        word(&mut out, originals_offset);
        word(&mut out, translations_offset);
        // No hash table; it sits, empty, right after the descriptor tables.
        word(&mut out, 0);
        word(&mut out, strings_offset);

        for (len, offset) in original_table.iter().chain(translation_table.iter()) {
            word(&mut out, *len);
            word(&mut out, *offset);
        }
        out.extend_from_slice(&strings);
        out
    }
}

//! Header fields stored as the translation of the empty msgid.
//!
//! The blob is a sequence of `Name: value` lines, for example:
//!
//! ```text
//! Project-Id-Version: scummvm 2.9.0git
//! Language: sv_SE
//! Content-Type: text/plain; charset=UTF-8
//! Plural-Forms: nplurals=2; plural=(n != 1);
//! ```
//!
//! Plural-Forms is exposed verbatim; it is not evaluated here.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CHARSET_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)charset\s*=\s*([^\s;]+)").ok());

/// One `Name: value` line of the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

/// Parsed catalog metadata, in the order the fields appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    fields: Vec<HeaderField>,
}

impl Metadata {
    /// Parse the raw blob. Lines without a colon are skipped; invalid UTF-8 is
    /// replaced.
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let fields = text
            .lines()
            .filter_map(|line| {
                let (name, value) = line.split_once(':')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(HeaderField {
                    name: name.to_string(),
                    value: value.trim().to_string(),
                })
            })
            .collect();
        Metadata { fields }
    }

    /// Value of the first field named `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn project_id_version(&self) -> Option<&str> {
        self.get("Project-Id-Version")
    }

    pub fn language(&self) -> Option<&str> {
        self.get("Language")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }

    pub fn plural_forms(&self) -> Option<&str> {
        self.get("Plural-Forms")
    }

    /// Charset named by the Content-Type field, e.g. `UTF-8`.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self.content_type()?;
        let re = CHARSET_RE.as_ref()?;
        re.captures(content_type)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::LoadResult;
use crate::metadata::Metadata;

/// Loads `.mo` catalogs and answers translation queries against the most
/// recently loaded one.
///
/// The reader is either empty or holds one catalog. Every load starts by
/// dropping the current catalog, so a failed load leaves the reader empty
/// rather than serving the previous catalog.
///
/// # Example
///
/// ```no_run
/// use mo_reader::MoReader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = MoReader::new();
/// reader.load_from_file("translations/sv_SE.mo")?;
/// println!("{}", reader.get_translation("Open"));
/// println!("{}", reader.get_translation_with_context("Open", "menu"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoReader {
    catalog: Option<Catalog>,
}

impl MoReader {
    pub fn new() -> Self {
        MoReader { catalog: None }
    }

    /// Parse `data` and make it the current catalog.
    ///
    /// # Errors
    /// See [`Catalog::parse`]. On error the reader is left empty.
    pub fn load(&mut self, data: &[u8]) -> LoadResult<()> {
        self.catalog = None;

        match Catalog::parse(data) {
            Ok(catalog) => {
                self.catalog = Some(catalog);
                Ok(())
            }
            Err(e) => {
                warn!(len = data.len(), error = %e, "rejected .mo catalog");
                Err(e)
            }
        }
    }

    /// Read `reader` to the end and load the bytes.
    ///
    /// # Errors
    /// Read failures, plus everything [`MoReader::load`] rejects.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> LoadResult<()> {
        self.catalog = None;

        let mut data = Vec::new();
        if let Err(e) = reader.read_to_end(&mut data) {
            warn!(error = %e, "failed to read .mo catalog");
            return Err(e.into());
        }
        self.load(&data)
    }

    /// Load the catalog stored at `path`.
    ///
    /// # Errors
    /// The file cannot be opened or read, or its contents are rejected by
    /// [`MoReader::load`].
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        let path = path.as_ref();
        self.catalog = None;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open .mo catalog");
                return Err(e.into());
            }
        };
        self.load_from_reader(file)?;
        debug!(path = %path.display(), entries = self.size(), "loaded .mo catalog");
        Ok(())
    }

    /// Translation of `msgid`, or an empty string when it has none.
    ///
    /// Valid UTF-8 is borrowed from the catalog; anything else is decoded
    /// lossily.
    pub fn get_translation(&self, msgid: &str) -> Cow<'_, str> {
        String::from_utf8_lossy(self.translation_bytes(msgid.as_bytes()))
    }

    /// Translation of `msgid` in `context`, falling back to the context-free
    /// translation. Returns an empty string when neither exists.
    pub fn get_translation_with_context(&self, msgid: &str, context: &str) -> Cow<'_, str> {
        String::from_utf8_lossy(
            self.translation_bytes_with_context(msgid.as_bytes(), context.as_bytes()),
        )
    }

    /// Raw-byte form of [`MoReader::get_translation`].
    pub fn translation_bytes(&self, msgid: &[u8]) -> &[u8] {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.lookup(msgid))
            .unwrap_or_default()
    }

    /// Raw-byte form of [`MoReader::get_translation_with_context`].
    pub fn translation_bytes_with_context(&self, msgid: &[u8], context: &[u8]) -> &[u8] {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.lookup_with_context(msgid, context))
            .unwrap_or_default()
    }

    /// Number of translatable entries in the current catalog.
    pub fn size(&self) -> usize {
        self.catalog.as_ref().map_or(0, Catalog::len)
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn metadata(&self) -> Option<Metadata> {
        self.catalog.as_ref().and_then(Catalog::metadata)
    }

    /// Drop the current catalog.
    pub fn clear(&mut self) {
        self.catalog = None;
    }
}

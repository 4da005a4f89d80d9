use ldif_types::Entry;
use ldif_wire::TextEncoding;

use crate::config::{HeaderComment, LineEnding, WriterConfig};
use crate::error::EncodeError;
use crate::writer::LdifWriter;

/// In-memory LDIF encoder with a builder-style API.
///
/// Collects entries, then serializes them all in one call. For large
/// exports, write through [`LdifWriter`] directly instead.
///
/// # Example
///
/// ```rust
/// use ldif_encoder::LdifEncoder;
/// use ldif_types::Entry;
///
/// let mut entry = Entry::new("cn=x");
/// entry.add_value("objectClass", "top").unwrap();
///
/// let text = LdifEncoder::new().add_entry(entry).encode_to_string().unwrap();
/// assert_eq!(text, "dn: cn=x\nobjectClass: top\n\n");
/// ```
#[derive(Default)]
pub struct LdifEncoder {
    entries: Vec<Entry>,
    config: WriterConfig,
}

impl LdifEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Content ─────────────────────────────────────────────────────────

    pub fn add_entry(&mut self, entry: Entry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = Entry>) -> &mut Self {
        self.entries.extend(entries);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Output options ──────────────────────────────────────────────────

    pub fn with_config(&mut self, config: WriterConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn utf16(&mut self) -> &mut Self {
        self.config.encoding = TextEncoding::Utf16;
        self
    }

    pub fn crlf(&mut self) -> &mut Self {
        self.config.line_ending = LineEnding::CrLf;
        self
    }

    pub fn fold_at(&mut self, width: usize) -> &mut Self {
        self.config = self.config.with_fold_width(width);
        self
    }

    pub fn with_header(&mut self, header: HeaderComment) -> &mut Self {
        self.config.header = header;
        self
    }

    // ── Serialization ───────────────────────────────────────────────────

    /// Serialize every entry in the configured encoding.
    ///
    /// An empty encoder is not an error; the output is then just the
    /// preamble (BOM and header comment, if configured).
    ///
    /// # Errors
    ///
    /// As [`LdifWriter::write_entry`].
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = LdifWriter::new(Vec::with_capacity(self.entries.len() * 128), self.config);
        writer.write_all(&self.entries)?;
        writer.finish()
    }

    /// Serialize to a `String`, always as UTF-8 text without a BOM,
    /// whatever encoding is configured.
    ///
    /// # Errors
    ///
    /// As [`LdifWriter::write_entry`].
    pub fn encode_to_string(&self) -> Result<String, EncodeError> {
        let config = self.config.with_encoding(TextEncoding::Utf8);
        let mut writer = LdifWriter::new(Vec::new(), config);
        writer.write_all(&self.entries)?;
        let bytes = writer.finish()?;
        // Everything written came from `&str` through the UTF-8 path.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

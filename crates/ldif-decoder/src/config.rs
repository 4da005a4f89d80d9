use ldif_types::SchemaMap;
use ldif_wire::TextEncoding;

/// Settings for one import run.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                          │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ encoding        │ Input encoding when no BOM is present            │
/// │ schema_map      │ Decides which `::` values are decoded to text    │
/// │ max_line_length │ Hard cap on a folded logical line, in bytes      │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// `encoding` only matters for byte input
/// ([`LdifReader::from_reader`](crate::LdifReader::from_reader),
/// [`LdifReader::open`](crate::LdifReader::open)); readers that are
/// already UTF-8 text ignore it.
#[derive(Clone, Debug, Default)]
pub struct DecoderConfig {
    pub encoding: TextEncoding,
    /// Without a map, every `::` value is kept as an undecoded binary
    /// value. With one, only text syntaxes are decoded.
    pub schema_map: Option<SchemaMap>,
    pub max_line_length: Option<usize>,
}

impl DecoderConfig {
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_schema_map(mut self, map: SchemaMap) -> Self {
        self.schema_map = Some(map);
        self
    }

    #[must_use]
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }
}

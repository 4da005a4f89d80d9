use ldif_types::Entry;

use crate::config::DecoderConfig;
use crate::error::{DecodeError, EntryError};
use crate::streaming::{DecoderEvent, LdifReader};

/// The result of decoding a complete LDIF document.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ DecodedLdif                                              │
/// │   entries:     Vec<Entry>      ← input order             │
/// │   diagnostics: Vec<EntryError> ← input order             │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedLdif {
    pub entries: Vec<Entry>,

    /// Recoverable problems met along the way. An entry dropped for an
    /// invalid changetype shows up here and not in `entries`.
    pub diagnostics: Vec<EntryError>,
}

impl DecodedLdif {
    /// `true` when nothing went wrong.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Synchronous LDIF decoder for input that is already in memory.
///
/// This is a thin collector over [`LdifReader`]; use the reader
/// directly for large files.
///
/// # Example
///
/// ```rust
/// use ldif_decoder::LdifDecoder;
///
/// let decoded = LdifDecoder::decode("version: 1\n\ndn: cn=x\nobjectClass: top\n\n").unwrap();
/// assert_eq!(decoded.entries.len(), 1);
/// assert_eq!(decoded.entries[0].object_classes(), ["top"]);
/// ```
pub struct LdifDecoder;

impl LdifDecoder {
    /// Decode UTF-8 text with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`decode_with`](Self::decode_with).
    pub fn decode(text: &str) -> Result<DecodedLdif, DecodeError> {
        Self::decode_with(text, DecoderConfig::default())
    }

    /// Decode UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Wire`] if a logical line exceeds
    /// `config.max_line_length`.
    pub fn decode_with(text: &str, config: DecoderConfig) -> Result<DecodedLdif, DecodeError> {
        collect(LdifReader::with_config(text.as_bytes(), config))
    }

    /// Decode raw bytes in `config.encoding` (or whatever the BOM says).
    ///
    /// # Errors
    ///
    /// As [`decode_with`](Self::decode_with).
    pub fn decode_bytes(bytes: &[u8], config: DecoderConfig) -> Result<DecodedLdif, DecodeError> {
        collect(LdifReader::from_reader(bytes, config))
    }
}

fn collect(
    events: impl Iterator<Item = Result<DecoderEvent, DecodeError>>,
) -> Result<DecodedLdif, DecodeError> {
    let mut decoded = DecodedLdif::default();
    for event in events {
        match event? {
            DecoderEvent::Entry(entry) => decoded.entries.push(entry),
            DecoderEvent::Diagnostic(diagnostic) => decoded.diagnostics.push(diagnostic),
        }
    }
    tracing::debug!(
        entries = decoded.entries.len(),
        diagnostics = decoded.diagnostics.len(),
        "decode finished"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use ldif_types::{AttrValue, SchemaMap};
    use ldif_wire::TextEncoding;

    use super::*;

    #[test]
    fn minimal_entry() {
        let decoded = LdifDecoder::decode("version: 1\n\ndn: cn=x\nobjectClass: top\n\n").unwrap();
        assert!(decoded.is_clean());
        let entry = &decoded.entries[0];
        assert_eq!(entry.dn(), "cn=x");
        assert_eq!(entry.object_classes(), ["top"]);
        assert_eq!(entry.attribute_count(), 0);
    }

    #[test]
    fn leading_byte_order_mark_in_text_is_ignored() {
        let decoded = LdifDecoder::decode("\u{FEFF}dn: cn=x\ncn: x\n\n").unwrap();
        assert!(decoded.is_clean());
        assert_eq!(decoded.entries.len(), 1);
        assert_eq!(decoded.entries[0].dn(), "cn=x");

        let decoded = LdifDecoder::decode("\u{FEFF}version: 1\n\ndn: cn=y\n\n").unwrap();
        assert!(decoded.is_clean());
        assert_eq!(decoded.entries[0].dn(), "cn=y");
    }

    #[test]
    fn folding_and_multivalue() {
        let text = "dn: cn=x\ndescription: hello\n  world\nmail: a@x\nmail: b@x\n\n";
        let entry = &LdifDecoder::decode(text).unwrap().entries[0];
        assert_eq!(entry.get("description"), Some(&AttrValue::from("hello world")));
        assert_eq!(
            entry.get("mail"),
            Some(&AttrValue::List(vec!["a@x".into(), "b@x".into()]))
        );
    }

    #[test]
    fn base64_dn() {
        let entry = &LdifDecoder::decode("dn:: Y249eA==\n\n").unwrap().entries[0];
        assert_eq!(entry.dn(), "cn=x");
        assert!(entry.flags().dn_base64);
    }

    #[test]
    fn invalid_changetype_is_skipped() {
        let text = "dn: cn=a\nchangetype: delete\n\ndn: cn=b\nobjectClass: top\n\n";
        let decoded = LdifDecoder::decode(text).unwrap();
        assert_eq!(decoded.entries.len(), 1);
        assert_eq!(decoded.entries[0].dn(), "cn=b");
        assert_eq!(decoded.diagnostics.len(), 1);
    }

    #[test]
    fn binary_without_schema_map() {
        let entry = &LdifDecoder::decode("dn: cn=a\njpegPhoto:: /9j/4AAQ\n\n").unwrap().entries[0];
        assert_eq!(
            entry.get_binary("jpegPhoto"),
            Some(&AttrValue::binary("/9j/4AAQ"))
        );
        assert!(entry.get("jpegPhoto").is_none());
    }

    #[test]
    fn binary_with_schema_map() {
        let map: SchemaMap = [("description", "2.5.5.12")].into_iter().collect();
        let config = DecoderConfig::default().with_schema_map(map);
        let decoded = LdifDecoder::decode_with("dn: cn=a\ndescription:: aGVsbG8=\n\n", config).unwrap();
        let entry = &decoded.entries[0];
        assert_eq!(entry.get("description"), Some(&AttrValue::from("hello")));
        assert!(entry.flags().contains_base64);
    }

    #[test]
    fn crlf_input_decodes_like_lf() {
        let lf = LdifDecoder::decode("dn: cn=a\ncn: a\n\ndn: cn=b\ncn: b\n").unwrap();
        let crlf = LdifDecoder::decode("dn: cn=a\r\ncn: a\r\n\r\n\r\ndn: cn=b\r\ncn: b\r\n").unwrap();
        assert_eq!(lf, crlf);
    }

    #[test]
    fn empty_and_comment_only_inputs() {
        assert_eq!(LdifDecoder::decode("").unwrap(), DecodedLdif::default());
        assert_eq!(
            LdifDecoder::decode("# nothing here\nversion: 1\n").unwrap(),
            DecodedLdif::default()
        );
    }

    #[test]
    fn decode_bytes_honours_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("dn: cn=x\n".encode_utf16().flat_map(u16::to_le_bytes));
        // Configured as UTF-8, but the BOM says UTF-16LE.
        let decoded = LdifDecoder::decode_bytes(&bytes, DecoderConfig::default()).unwrap();
        assert_eq!(decoded.entries[0].dn(), "cn=x");

        let decoded = LdifDecoder::decode_bytes(
            &bytes[2..],
            DecoderConfig::default().with_encoding(TextEncoding::Utf16),
        )
        .unwrap();
        assert_eq!(decoded.entries[0].dn(), "cn=x");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let decoded = LdifDecoder::decode_bytes(b"dn: cn=\xFFx\n", DecoderConfig::default()).unwrap();
        assert_eq!(decoded.entries[0].dn(), "cn=\u{FFFD}x");
    }
}

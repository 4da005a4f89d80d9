//! Roundtrip integration tests for the decode → encode → decode pipeline.
//!
//! For entries without binary-origin ambiguity, encoding with
//! [`LdifEncoder`] and decoding with [`LdifDecoder`] reproduces the same
//! DN, changetype, objectClass list, attribute set, values and value
//! order. Decoded fixtures additionally re-encode to byte-identical text
//! on the second pass, since the writer output is canonical.

use ldif_decoder::{DecoderConfig, LdifDecoder};
use ldif_encoder::{EncodeError, HeaderComment, LdifEncoder, LdifWriter, WriterConfig};
use ldif_tests::{people, person, read_fixture, text_values};
use ldif_types::{AttrValue, Entry};
use ldif_wire::TextEncoding;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn encode(entries: &[Entry]) -> Result<String, EncodeError> {
    LdifEncoder::new().add_entries(entries.iter().cloned()).encode_to_string()
}

fn roundtrip(entries: &[Entry]) -> Vec<Entry> {
    let text = encode(entries).unwrap();
    let decoded = LdifDecoder::decode(&text).unwrap();
    assert!(decoded.is_clean(), "diagnostics: {:?}", decoded.diagnostics);
    decoded.entries
}

// ── Entry model ───────────────────────────────────────────────────────────────

#[test]
fn single_person() {
    let original = vec![person(1)];
    assert_eq!(roundtrip(&original), original);
}

#[test]
fn many_people() {
    let original = people(250);
    assert_eq!(roundtrip(&original), original);
}

#[test]
fn value_order_is_preserved() {
    let mut entry = Entry::new("cn=order,dc=example");
    for value in ["zeta", "alpha", "mu", "beta"] {
        entry.add_value("member", value).unwrap();
    }
    let back = roundtrip(std::slice::from_ref(&entry));
    assert_eq!(text_values(&back[0], "member"), ["zeta", "alpha", "mu", "beta"]);
}

#[test]
fn changetype_spelling_is_preserved() {
    let mut entry = Entry::new("cn=schema,dc=example");
    entry.add_value("changetype", "ntdsSchemaAdd").unwrap();
    let back = roundtrip(std::slice::from_ref(&entry));
    assert_eq!(back[0].change_type(), Some("ntdsSchemaAdd"));
}

#[test]
fn binary_values_survive_without_schema_map() {
    let mut entry = Entry::new("cn=photo,dc=example");
    entry.add_binary("jpegPhoto", "/9j/4AAQSkZJRg==").unwrap();
    entry.add_binary("jpegPhoto", "iVBORw0KGgo=").unwrap();
    let back = roundtrip(std::slice::from_ref(&entry));
    assert_eq!(
        back[0].get_binary("jpegPhoto"),
        Some(&AttrValue::Binary(vec![
            "/9j/4AAQSkZJRg==".into(),
            "iVBORw0KGgo=".into()
        ]))
    );
}

#[test]
fn values_with_leading_and_trailing_spaces() {
    let mut entry = Entry::new("cn=spaces,dc=example");
    entry.add_value("description", " padded ").unwrap();
    let back = roundtrip(std::slice::from_ref(&entry));
    assert_eq!(text_values(&back[0], "description"), [" padded "]);
}

#[test]
fn non_ascii_values() {
    let mut entry = Entry::new("cn=Zoë Ünïcode,dc=example");
    entry.add_value("displayName", "Zoë 日本語").unwrap();
    assert_eq!(roundtrip(std::slice::from_ref(&entry)), [entry]);
}

// ── Writer options ────────────────────────────────────────────────────────────

#[test]
fn folded_output_roundtrips() {
    let original = people(20);
    let text = LdifEncoder::new()
        .add_entries(original.iter().cloned())
        .fold_at(24)
        .encode_to_string()
        .unwrap();
    assert!(text.lines().any(|l| l.starts_with(' ')));
    assert_eq!(LdifDecoder::decode(&text).unwrap().entries, original);
}

#[test]
fn crlf_output_roundtrips() {
    let original = people(5);
    let text = LdifEncoder::new()
        .add_entries(original.iter().cloned())
        .crlf()
        .encode_to_string()
        .unwrap();
    assert!(text.contains("\r\n\r\n"));
    assert_eq!(LdifDecoder::decode(&text).unwrap().entries, original);
}

#[test]
fn utf16_output_roundtrips() {
    let original = vec![person(7)];
    let bytes = LdifEncoder::new()
        .add_entries(original.iter().cloned())
        .utf16()
        .encode()
        .unwrap();
    // The BOM is enough; the configured encoding is not needed.
    let decoded = LdifDecoder::decode_bytes(&bytes, DecoderConfig::default()).unwrap();
    assert_eq!(decoded.entries, original);
}

#[test]
fn header_comment_is_ignored_on_read() {
    let original = people(3);
    let text = LdifEncoder::new()
        .add_entries(original.iter().cloned())
        .with_header(HeaderComment::Timestamp(None))
        .encode_to_string()
        .unwrap();
    assert!(text.starts_with("# Generated "));
    assert_eq!(LdifDecoder::decode(&text).unwrap().entries, original);
}

#[test]
fn file_roundtrip_through_writer_and_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.ldif");
    let original = people(40);

    let config = WriterConfig::default().with_encoding(TextEncoding::Utf16);
    let mut writer = LdifWriter::create(&path, config).unwrap();
    writer.write_all(&original).unwrap();
    writer.finish().unwrap();

    let read: Vec<Entry> = ldif_decoder::LdifReader::open(&path, DecoderConfig::default())
        .unwrap()
        .map(|event| match event.unwrap() {
            ldif_decoder::DecoderEvent::Entry(entry) => entry,
            ldif_decoder::DecoderEvent::Diagnostic(d) => panic!("unexpected diagnostic: {d}"),
        })
        .collect();
    assert_eq!(read, original);
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

#[test]
fn fixtures_reencode_canonically() {
    for fixture in ["people.ldif", "binary.ldif", "changetypes.ldif"] {
        let first = LdifDecoder::decode(&read_fixture(fixture)).unwrap();
        let once = encode(&first.entries).unwrap();
        let twice = encode(&LdifDecoder::decode(&once).unwrap().entries).unwrap();
        assert_eq!(once, twice, "{fixture}");
    }
}

#![no_main]

use arbitrary::Arbitrary;
use ldif_decoder::LdifDecoder;
use ldif_encoder::LdifEncoder;
use ldif_types::Entry;
use libfuzzer_sys::fuzz_target;

// Fuzz target: entries written by the encoder decode back unchanged.
//
// Names and values are drawn from byte strings mapped onto a safe
// alphabet. Fold width, CRLF and the header comment are fuzzed too.

#[derive(Debug, Arbitrary)]
struct FuzzAttribute {
    name: Vec<u8>,
    values: Vec<Vec<u8>>,
    binary: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzEntry {
    rdn: Vec<u8>,
    classes: Vec<Vec<u8>>,
    attributes: Vec<FuzzAttribute>,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    entries: Vec<FuzzEntry>,
    fold: Option<u8>,
    crlf: bool,
}

const NAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";
const VALUE_CHARS: &str = "abcXYZ019 .,=@é漢";
const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// `x` prefix keeps generated names clear of dn/changetype/objectClass.
fn name(bytes: &[u8]) -> String {
    let mut name = String::from("x");
    name.extend(bytes.iter().take(16).map(|b| char::from(NAME_CHARS[usize::from(*b) % NAME_CHARS.len()])));
    name
}

/// Non-empty, no leading space.
fn value(bytes: &[u8]) -> String {
    let chars: Vec<char> = VALUE_CHARS.chars().collect();
    let mut value = String::from("v");
    value.extend(bytes.iter().take(64).map(|b| chars[usize::from(*b) % chars.len()]));
    value
}

fn payload(bytes: &[u8]) -> String {
    let mut payload = String::from("AAAA");
    payload.extend(bytes.iter().take(64).map(|b| char::from(BASE64_CHARS[usize::from(*b) % BASE64_CHARS.len()])));
    payload
}

fn build(fuzz: &FuzzEntry, index: usize) -> Option<Entry> {
    let mut entry = Entry::new(format!("cn={},n={index}", value(&fuzz.rdn)));
    for class in fuzz.classes.iter().take(4) {
        entry.add_value("objectClass", value(class)).ok()?;
    }
    for attribute in fuzz.attributes.iter().take(8) {
        let name = name(&attribute.name);
        for v in attribute.values.iter().take(4) {
            if attribute.binary {
                entry.add_binary(&name, payload(v)).ok()?;
            } else {
                entry.add_value(&name, value(v)).ok()?;
            }
        }
    }
    Some(entry)
}

fuzz_target!(|input: FuzzInput| {
    let Some(entries) = input
        .entries
        .iter()
        .take(8)
        .enumerate()
        .map(|(i, e)| build(e, i))
        .collect::<Option<Vec<_>>>()
    else {
        return;
    };

    let mut encoder = LdifEncoder::new();
    encoder.add_entries(entries.clone());
    if let Some(width) = input.fold {
        encoder.fold_at(usize::from(width));
    }
    if input.crlf {
        encoder.crlf();
    }

    let text = encoder.encode_to_string().expect("generated entries encode");
    let decoded = LdifDecoder::decode(&text).expect("encoder output decodes");
    assert!(decoded.diagnostics.is_empty(), "{:?}\n{text}", decoded.diagnostics);
    assert_eq!(decoded.entries, entries, "\n{text}");
});

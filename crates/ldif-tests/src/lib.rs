//! Shared helpers for the integration tests and benches.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use ldif_decoder::DecodedLdif;
use ldif_types::{AttrValue, Entry};

/// Absolute path of `tests/fixtures/<name>`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Read a fixture as UTF-8 text.
///
/// # Panics
///
/// If the fixture is missing or not UTF-8.
#[must_use]
pub fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Stable plain-text dump of a decode result, for snapshots.
///
/// ```text
/// entry 0: cn=x,dc=example
///   changetype: add
///   objectClass: top | person
///   mail: a@x | b@x
///   jpegPhoto (binary): /9j/4AAQ
///   flags: dnBase64
/// diagnostic: line 7: invalid line: ...
/// ```
#[must_use]
pub fn render(decoded: &DecodedLdif) -> String {
    let mut out = String::new();
    for (index, entry) in decoded.entries.iter().enumerate() {
        render_entry(&mut out, index, entry);
    }
    for diagnostic in &decoded.diagnostics {
        let _ = writeln!(out, "diagnostic: {diagnostic}");
    }
    out.trim_end().to_string()
}

fn render_entry(out: &mut String, index: usize, entry: &Entry) {
    let _ = writeln!(out, "entry {index}: {}", entry.dn());
    if let Some(change_type) = entry.change_type() {
        let _ = writeln!(out, "  changetype: {change_type}");
    }
    if !entry.object_classes().is_empty() {
        let _ = writeln!(out, "  objectClass: {}", entry.object_classes().join(" | "));
    }
    for attribute in entry.attributes() {
        let marker = if attribute.value.is_binary() { " (binary)" } else { "" };
        let _ = writeln!(
            out,
            "  {}{marker}: {}",
            attribute.name,
            attribute.value.values().join(" | ")
        );
    }
    if let Some(side) = entry.side_indicator() {
        let _ = writeln!(out, "  sideIndicator: {side}");
    }

    let flags = entry.flags();
    let mut labels = Vec::new();
    if flags.dn_base64 {
        labels.push("dnBase64");
    }
    if flags.contains_base64 {
        labels.push("containsBase64");
    }
    if !labels.is_empty() {
        let _ = writeln!(out, "  flags: {}", labels.join(" "));
    }
}

/// A realistic person entry, numbered for uniqueness.
///
/// # Panics
///
/// If the entry model rejects one of the attribute names used here.
#[must_use]
pub fn person(n: usize) -> Entry {
    let mut entry = Entry::new(format!("cn=User {n:05},ou=People,dc=example,dc=com"));
    let add = |entry: &mut Entry, name: &str, value: String| {
        entry
            .add_value(name, value)
            .unwrap_or_else(|e| panic!("sample attribute {name}: {e}"));
    };
    add(&mut entry, "objectClass", "top".into());
    add(&mut entry, "objectClass", "person".into());
    add(&mut entry, "objectClass", "organizationalPerson".into());
    add(&mut entry, "cn", format!("User {n:05}"));
    add(&mut entry, "sn", format!("{n:05}"));
    add(&mut entry, "mail", format!("user{n}@example.com"));
    add(&mut entry, "mail", format!("u{n}@mail.example.com"));
    add(
        &mut entry,
        "description",
        format!("Generated account number {n} used for benchmarks and roundtrip tests"),
    );
    entry
}

/// `count` sample entries.
#[must_use]
pub fn people(count: usize) -> Vec<Entry> {
    (0..count).map(person).collect()
}

/// Convenience: the text values of a named attribute, or empty.
#[must_use]
pub fn text_values<'a>(entry: &'a Entry, name: &str) -> &'a [String] {
    entry.get(name).map(AttrValue::values).unwrap_or_default()
}

/// Implementation of `ldif validate`.
///
/// Decodes the whole file and reports every diagnostic. Exits with code
/// 0 when the file decodes cleanly and 1 otherwise.
///
/// # Success output
///
/// ```text
/// ✓ Read: people.ldif (utf8)
/// ✓ Entries: 312 entries decoded
/// ✓ Diagnostics: none
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Read: people.ldif (utf8)
/// ✓ Entries: 311 entries decoded
/// ✗ line 88: invalid line: this is not ldif
/// ✗ line 140: invalid changetype "delete" in entry cn=old,dc=example; entry skipped
/// ```
///
/// A fatal error (unreadable file, over-long line) prints a single `✗`
/// line instead.
use anyhow::{Result, anyhow};
use ldif_decoder::{DecodeError, DecoderEvent, LdifReader};

use crate::ValidateArgs;
use crate::options::decoder_config;

/// Run the `ldif validate` command.
///
/// # Errors
///
/// Returns an error if the input flags are invalid, the file cannot be
/// decoded, or any diagnostic was produced.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let config = decoder_config(&args.input)?;
    let encoding = config.encoding.label();

    let reader = match LdifReader::open(&args.input.file, config) {
        Ok(reader) => reader,
        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            return Err(anyhow!("validation failed"));
        }
    };

    let mut entries = 0usize;
    let mut diagnostics = Vec::new();
    for event in reader {
        match event {
            Ok(DecoderEvent::Entry(_)) => entries += 1,
            Ok(DecoderEvent::Diagnostic(d)) => diagnostics.push(d),
            Err(e) => {
                println!("✗ Error: {}", decode_error_diagnostic(&e));
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!("✓ Read: {} ({encoding})", args.input.file.display());
    println!(
        "✓ Entries: {entries} entr{} decoded",
        if entries == 1 { "y" } else { "ies" }
    );

    if diagnostics.is_empty() {
        println!("✓ Diagnostics: none");
        return Ok(());
    }
    for diagnostic in &diagnostics {
        println!("✗ {diagnostic}");
    }
    Err(anyhow!(
        "validation failed with {} diagnostic{}",
        diagnostics.len(),
        if diagnostics.len() == 1 { "" } else { "s" }
    ))
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a fatal `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────┐
/// │ DecodeError variant  │ Diagnostic                               │
/// ├──────────────────────┼──────────────────────────────────────────┤
/// │ Open                 │ "cannot open <path>: <io error>"         │
/// │ Wire(LineTooLong)    │ "line N longer than L bytes"             │
/// │ Wire(Io) / Io        │ "read failed: <io error>"                │
/// └──────────────────────┴──────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::Wire(ldif_wire::WireError::LineTooLong { line, limit }) => {
            format!("line {line} longer than {limit} bytes")
        }
        DecodeError::Wire(ldif_wire::WireError::Io(io)) | DecodeError::Io(io) => {
            format!("read failed: {io}")
        }
        other => other.to_string(),
    }
}

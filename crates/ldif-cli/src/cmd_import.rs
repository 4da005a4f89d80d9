/// Implementation of `ldif import`.
///
/// Streams an LDIF file through [`LdifReader`] and writes one JSON
/// object per entry, one per line. Entries are written as soon as they
/// are complete, so memory use stays flat for large exports.
///
/// # Output format
///
/// ```text
/// {"dn":"cn=x,dc=example","objectClass":["top","person"],"cn":"x","reverseDN":"dc=example,cn=x","_flags":{"dnBase64":false,"containsBase64":false}}
/// {"dn":"cn=y,dc=example", ...}
/// ```
///
/// Diagnostics (skipped lines, dropped entries) are logged as warnings
/// on stderr; they do not fail the command. A summary line follows on
/// stderr.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use ldif_decoder::{DecoderEvent, LdifReader};

use crate::ImportArgs;
use crate::options::decoder_config;
use crate::record::to_record;

/// Run the `ldif import` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or read, a line
/// exceeds `--max-line-length`, or the output cannot be written.
pub fn run(args: &ImportArgs) -> Result<()> {
    let config = decoder_config(&args.input)?;
    let reader = LdifReader::open(&args.input.file, config)?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = BufWriter::new(sink);

    let mut entries = 0usize;
    let mut diagnostics = 0usize;
    for event in reader {
        match event.with_context(|| format!("failed to decode {}", args.input.file.display()))? {
            DecoderEvent::Entry(entry) => {
                serde_json::to_writer(&mut sink, &to_record(&entry))?;
                sink.write_all(b"\n")?;
                entries += 1;
            }
            DecoderEvent::Diagnostic(_) => diagnostics += 1,
        }
    }
    sink.flush()?;

    eprintln!(
        "imported {entries} entr{} from {} ({diagnostics} diagnostic{})",
        if entries == 1 { "y" } else { "ies" },
        args.input.file.display(),
        if diagnostics == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Implementation of `ldif export`.
///
/// Reads JSON records (the shape produced by `ldif import`) and writes
/// them as LDIF through [`LdifWriter`]. The input may be JSON Lines or a
/// single JSON array.
///
/// Records are converted and written one at a time; the first bad
/// record stops the export with an error naming its index.
use std::fs;

use anyhow::{Context, Result};
use ldif_encoder::{HeaderComment, LdifWriter, LineEnding, WriterConfig};
use serde_json::Value;

use crate::ExportArgs;
use crate::options::parse_encoding;
use crate::record::from_record;

/// Run the `ldif export` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, a record is
/// not a valid entry, or the output cannot be written.
pub fn run(args: &ExportArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let records = parse_records(&text)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let config = writer_config(args)?;
    let mut writer = LdifWriter::create(&args.output, config)?;
    for (index, record) in records.iter().enumerate() {
        let entry = from_record(record, index)?;
        writer
            .write_entry(&entry)
            .with_context(|| format!("record {index} ({})", entry.dn()))?;
    }
    let written = writer.entries_written();
    writer.finish()?;

    eprintln!(
        "exported {written} entr{} to {}",
        if written == 1 { "y" } else { "ies" },
        args.output.display()
    );
    Ok(())
}

fn writer_config(args: &ExportArgs) -> Result<WriterConfig> {
    let mut config = WriterConfig::default().with_encoding(parse_encoding(&args.encoding)?);
    if args.crlf {
        config = config.with_line_ending(LineEnding::CrLf);
    }
    if let Some(width) = args.fold {
        config = config.with_fold_width(width);
    }
    if args.timestamp {
        config = config.with_header(HeaderComment::Timestamp(None));
    }
    Ok(config)
}

/// A JSON array, or any sequence of whitespace-separated JSON values
/// (which covers JSON Lines).
fn parse_records(text: &str) -> serde_json::Result<Vec<Value>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text);
    }
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .collect()
}

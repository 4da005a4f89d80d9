use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use ldif_decoder::DecoderConfig;
use ldif_types::SchemaMap;
use ldif_wire::TextEncoding;

use crate::InputArgs;

/// Build the decoder configuration from the shared input flags.
///
/// # Errors
///
/// Returns an error for an unknown encoding, an unreadable or malformed
/// schema-map file, or a `--map` flag without `=`.
pub fn decoder_config(args: &InputArgs) -> Result<DecoderConfig> {
    let mut config = DecoderConfig::default().with_encoding(parse_encoding(&args.encoding)?);

    if args.schema_map.is_some() || !args.map.is_empty() {
        let mut map = match &args.schema_map {
            Some(path) => load_schema_map(path)?,
            None => SchemaMap::new(),
        };
        for pair in &args.map {
            let (name, oid) = parse_map_pair(pair)?;
            map.insert(name, oid);
        }
        tracing::debug!(entries = map.len(), "schema map loaded");
        config = config.with_schema_map(map);
    }

    if let Some(limit) = args.max_line_length {
        config = config.with_max_line_length(limit);
    }
    Ok(config)
}

// ── Flag parsers ──────────────────────────────────────────────────────────────

/// Parses an `--encoding` string.
///
/// # Errors
///
/// Returns an error for unrecognised encoding names.
pub fn parse_encoding(s: &str) -> Result<TextEncoding> {
    match s.to_lowercase().replace('-', "").as_str() {
        "utf8" => Ok(TextEncoding::Utf8),
        "utf16" | "utf16le" | "unicode" => Ok(TextEncoding::Utf16),
        _ => Err(anyhow!("unknown encoding {s:?}, expected utf8|utf16")),
    }
}

/// Parses one `--map NAME=OID` flag.
///
/// # Errors
///
/// Returns an error if there is no `=` or either side is empty.
fn parse_map_pair(s: &str) -> Result<(&str, &str)> {
    match s.split_once('=') {
        Some((name, oid)) if !name.trim().is_empty() && !oid.trim().is_empty() => {
            Ok((name.trim(), oid.trim()))
        }
        _ => Err(anyhow!("invalid --map {s:?}, expected NAME=OID")),
    }
}

/// Reads a schema map from a JSON object of `name → OID` strings.
fn load_schema_map(path: &Path) -> Result<SchemaMap> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let raw: BTreeMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object of strings", path.display()))?;
    Ok(raw.into_iter().collect())
}

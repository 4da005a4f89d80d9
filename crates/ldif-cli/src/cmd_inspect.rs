/// Implementation of `ldif inspect`.
///
/// Prints one summary line per entry, followed by any diagnostics.
///
/// # Output format
///
/// ```text
/// Entry 0: cn=x,dc=example [add] classes=top,person attrs=4
/// Entry 1: cn=photo,dc=example classes=person attrs=2 binary=jpegPhoto
///          flags: dn-base64
/// ---
/// 2 entries, 0 diagnostics
/// ```
use anyhow::{Context, Result};
use ldif_decoder::{DecoderEvent, LdifReader};
use ldif_types::Entry;

use crate::InspectArgs;
use crate::options::decoder_config;

/// Run the `ldif inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoding fails.
pub fn run(args: &InspectArgs) -> Result<()> {
    let config = decoder_config(&args.input)?;
    let reader = LdifReader::open(&args.input.file, config)?;

    let mut index = 0usize;
    let mut diagnostics = Vec::new();
    for event in reader {
        match event.with_context(|| format!("failed to decode {}", args.input.file.display()))? {
            DecoderEvent::Entry(entry) => {
                // When --entry N is specified, skip all other indices.
                if args.entry.is_none_or(|target| target == index) {
                    print_entry(index, &entry);
                }
                index += 1;
            }
            DecoderEvent::Diagnostic(d) => diagnostics.push(d),
        }
    }

    println!("---");
    for diagnostic in &diagnostics {
        println!("! {diagnostic}");
    }
    println!(
        "{index} entr{}, {} diagnostic{}",
        if index == 1 { "y" } else { "ies" },
        diagnostics.len(),
        if diagnostics.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn print_entry(index: usize, entry: &Entry) {
    let mut line = format!("Entry {index}: {}", entry.dn());
    if let Some(change_type) = entry.change_type() {
        line.push_str(&format!(" [{change_type}]"));
    }
    if !entry.object_classes().is_empty() {
        line.push_str(&format!(" classes={}", entry.object_classes().join(",")));
    }
    line.push_str(&format!(" attrs={}", entry.attribute_count()));

    let binary: Vec<&str> = entry
        .attributes()
        .filter(|a| a.value.is_binary())
        .map(|a| a.name.as_str())
        .collect();
    if !binary.is_empty() {
        line.push_str(&format!(" binary={}", binary.join(",")));
    }
    println!("{line}");

    let flags = entry.flags();
    let labels: Vec<&str> = [
        (flags.dn_base64, "dn-base64"),
        (flags.contains_base64, "contains-base64"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();
    if !labels.is_empty() {
        println!("         flags: {}", labels.join(" "));
    }
}

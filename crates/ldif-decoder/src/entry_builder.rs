use ldif_types::{Entry, SchemaMap, TypeError};
use ldif_wire::{AttrLine, LogicalLine, ParsedLine, ValueNotation};

use crate::error::EntryError;
use crate::streaming::DecoderEvent;
use crate::value_decoder::{self, Decision};

/// Builder state.
///
/// ```text
///            dn:                      blank
///   Idle ───────────▶ InEntry ─────────────────▶ Idle   (entry emitted)
///                      │  ▲ │
///                      │  └─┘ dn: (emit, start new entry)
///                      │
///                      │ changetype not add/ntdsSchemaAdd
///                      ▼
///                    Skipping ──── blank ──────▶ Idle   (nothing emitted)
/// ```
///
/// `Skipping` is the fast-forward after a rejected changetype: every
/// line up to the next blank line is discarded, including `dn:` lines.
#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InEntry(Entry),
    Skipping,
}

/// Turns logical lines into entries, one line at a time.
///
/// Each call to [`feed`](Self::feed) yields at most one event: a
/// finished entry, or a diagnostic. [`finish`](Self::finish) flushes an
/// entry still open at end of input.
#[derive(Debug, Default)]
pub struct EntryBuilder {
    state: State,
    schema: Option<SchemaMap>,
}

impl EntryBuilder {
    #[must_use]
    pub fn new(schema: Option<SchemaMap>) -> Self {
        Self {
            state: State::Idle,
            schema,
        }
    }

    /// `true` while an entry is being accumulated.
    #[must_use]
    pub fn has_open_entry(&self) -> bool {
        matches!(self.state, State::InEntry(_))
    }

    /// Consume one logical line.
    pub fn feed(&mut self, line: &LogicalLine) -> Option<DecoderEvent> {
        match ParsedLine::parse(&line.text) {
            ParsedLine::Blank => match std::mem::take(&mut self.state) {
                State::InEntry(entry) => Some(DecoderEvent::Entry(entry)),
                State::Idle | State::Skipping => None,
            },

            _ if matches!(self.state, State::Skipping) => None,

            ParsedLine::Dn { value, notation } => {
                let entry = open_entry(value, notation, line.line_number);
                match std::mem::replace(&mut self.state, State::InEntry(entry)) {
                    State::InEntry(previous) => {
                        tracing::debug!(
                            line = line.line_number,
                            dn = previous.dn(),
                            "dn line before blank line; closing previous entry"
                        );
                        Some(DecoderEvent::Entry(previous))
                    }
                    State::Idle | State::Skipping => None,
                }
            }

            ParsedLine::Attribute(attr) => {
                let State::InEntry(entry) = &mut self.state else {
                    return Some(DecoderEvent::Diagnostic(EntryError::AttributeOutsideEntry {
                        line: line.line_number,
                        text: line.text.clone(),
                    }));
                };

                let error = apply_attribute(entry, attr, self.schema.as_ref(), line)?;
                if matches!(error, EntryError::InvalidChangeType { .. }) {
                    self.state = State::Skipping;
                }
                Some(DecoderEvent::Diagnostic(error))
            }

            ParsedLine::Invalid => Some(DecoderEvent::Diagnostic(EntryError::InvalidLine {
                line: line.line_number,
                text: line.text.clone(),
            })),
        }
    }

    /// End of input: emit the open entry, if any, and reset to idle.
    pub fn finish(&mut self) -> Option<DecoderEvent> {
        match std::mem::take(&mut self.state) {
            State::InEntry(entry) => Some(DecoderEvent::Entry(entry)),
            State::Idle | State::Skipping => None,
        }
    }
}

/// Start an entry from a `dn:` / `dn::` line.
///
/// A `dn::` value is decoded only when it is plausible Base64 and
/// decodes to UTF-8; otherwise it is used verbatim and the entry is
/// not flagged.
fn open_entry(value: &str, notation: ValueNotation, line: usize) -> Entry {
    if notation == ValueNotation::Base64 {
        if let Some(decoded) = value_decoder::decode_base64_text(value) {
            let mut entry = Entry::new(decoded);
            entry.mark_dn_base64();
            tracing::debug!(line, dn = entry.dn(), "entry started (Base64 DN)");
            return entry;
        }
    }
    tracing::debug!(line, dn = value, "entry started");
    Entry::new(value)
}

/// Merge one attribute line into `entry`. Returns a diagnostic if the
/// line could not be applied.
fn apply_attribute(
    entry: &mut Entry,
    attr: AttrLine<'_>,
    schema: Option<&SchemaMap>,
    line: &LogicalLine,
) -> Option<EntryError> {
    let result = match value_decoder::decide(attr.name, attr.value, attr.notation, schema) {
        Decision::Text { value, decoded } => {
            if decoded {
                entry.mark_contains_base64();
            }
            entry.add_value(attr.name, value)
        }
        Decision::Binary(payload) => entry.add_binary(attr.name, payload),
    };

    match result {
        Ok(()) => None,
        Err(TypeError::InvalidChangeType { value }) => Some(EntryError::InvalidChangeType {
            line: line.line_number,
            dn: entry.dn().to_string(),
            value,
        }),
        Err(TypeError::DuplicateChangeType { value }) => {
            Some(EntryError::DuplicateChangeType {
                line: line.line_number,
                dn: entry.dn().to_string(),
                value,
            })
        }
        Err(_) => Some(EntryError::InvalidLine {
            line: line.line_number,
            text: line.text.clone(),
        }),
    }
}

use std::path::PathBuf;

use ldif_wire::WireError;

/// Fatal errors: the run stops and no further entries are produced.
///
/// ```text
///   DecodeError
///   ├── Open { path, source } ← input file could not be opened
///   ├── Wire(WireError)       ← read failure or over-long line
///   └── Io(std::io::Error)    ← any other I/O failure
/// ```
///
/// Problems local to one entry are not errors at this level; they are
/// reported as [`EntryError`] diagnostics and decoding carries on.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Recoverable, entry-local problems.
///
/// ```text
/// ┌───────────────────────┬──────────────────────────────────────────┐
/// │ Variant               │ Effect                                   │
/// ├───────────────────────┼──────────────────────────────────────────┤
/// │ InvalidLine           │ line skipped, entry continues            │
/// │ AttributeOutsideEntry │ line skipped (no `dn:` seen yet)         │
/// │ InvalidChangeType     │ whole entry dropped, resume after blank  │
/// │ DuplicateChangeType   │ line skipped, first changetype kept      │
/// └───────────────────────┴──────────────────────────────────────────┘
/// ```
///
/// `line` is the 1-based physical line where the offending logical
/// line starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("line {line}: invalid line: {text}")]
    InvalidLine { line: usize, text: String },

    #[error("line {line}: attribute outside of any entry: {text}")]
    AttributeOutsideEntry { line: usize, text: String },

    #[error("line {line}: invalid changetype {value:?} in entry {dn}; entry skipped")]
    InvalidChangeType {
        line: usize,
        dn: String,
        value: String,
    },

    #[error("line {line}: duplicate changetype {value:?} in entry {dn}; first value kept")]
    DuplicateChangeType {
        line: usize,
        dn: String,
        value: String,
    },
}

impl EntryError {
    /// Line number the diagnostic refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidLine { line, .. }
            | Self::AttributeOutsideEntry { line, .. }
            | Self::InvalidChangeType { line, .. }
            | Self::DuplicateChangeType { line, .. } => *line,
        }
    }
}

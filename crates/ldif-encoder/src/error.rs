use std::path::PathBuf;

use ldif_types::TypeError;

/// Errors that can occur while writing LDIF.
///
/// ```text
///   EncodeError
///   ├── Create { path, source } ← output file could not be created
///   ├── LineBreakInValue        ← a value contains CR or LF
///   ├── Type(TypeError)         ← from ldif-types validation
///   └── Io(std::io::Error)      ← from the underlying sink
/// ```
///
/// Any error aborts the write; entries already written stay in the
/// sink.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("value of {attribute} contains a line break and cannot be written on one line")]
    LineBreakInValue { attribute: String },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

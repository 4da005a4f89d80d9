/// Errors raised while turning raw bytes into logical LDIF lines.
///
/// Everything at this layer is fatal for the run: once the underlying
/// stream fails there is no record boundary to resynchronise on.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A logical line (after continuation folding) grew past the
    /// configured limit.
    #[error("logical line starting at line {line} exceeds {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised when an [`Entry`](crate::Entry) would be put into a
/// state that cannot be written back out as LDIF.
///
/// ```text
/// ┌──────────────────────┬────────────────────────────────────────────┐
/// │ Variant              │ Cause                                      │
/// ├──────────────────────┼────────────────────────────────────────────┤
/// │ EmptyDn              │ DN is empty or whitespace only             │
/// │ InvalidChangeType    │ changetype other than add / ntdsSchemaAdd  │
/// │ DuplicateChangeType  │ second changetype line in one entry        │
/// │ InvalidAttributeName │ name fails [a-zA-Z][-a-zA-Z0-9;]*          │
/// │ ReservedAttribute    │ `dn` added as an ordinary attribute        │
/// └──────────────────────┴────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  #[error("entry DN must not be empty")]
  EmptyDn,

  /// Only the "add" family of change records is supported.
  #[error("invalid changetype: {value}")]
  InvalidChangeType { value: String },

  /// The entry already has a changetype; the first one is kept.
  #[error("duplicate changetype: {value}")]
  DuplicateChangeType { value: String },

  #[error("invalid attribute name: {name:?}")]
  InvalidAttributeName { name: String },

  /// The name is one of the entry's fixed fields and cannot be stored
  /// through the generic attribute API.
  #[error("attribute {name} is reserved")]
  ReservedAttribute { name: String },
}

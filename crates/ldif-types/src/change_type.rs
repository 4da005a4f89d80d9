use crate::error::TypeError;

/// The change record kinds this codec accepts.
///
/// LDIF also defines `delete`, `modify` and `modrdn`; those are rejected
/// at import time and the whole record is skipped.
///
/// ```text
/// ┌──────────────┬───────────────────┐
/// │ Variant      │ Accepted spelling │
/// ├──────────────┼───────────────────┤
/// │ Add          │ add               │
/// │ NtdsSchemaAdd│ ntdsSchemaAdd     │
/// └──────────────┴───────────────────┘
/// ```
///
/// Matching is case-insensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
  Add,
  /// Active Directory schema extension records.
  NtdsSchemaAdd,
}

impl ChangeType {
  /// Parse a changetype value, case-insensitively.
  ///
  /// # Errors
  ///
  /// [`TypeError::InvalidChangeType`] for anything other than `add` or
  /// `ntdsschemaadd`.
  pub fn parse(value: &str) -> Result<Self, TypeError> {
    if value.eq_ignore_ascii_case("add") {
      Ok(Self::Add)
    } else if value.eq_ignore_ascii_case("ntdsschemaadd") {
      Ok(Self::NtdsSchemaAdd)
    } else {
      Err(TypeError::InvalidChangeType {
        value: value.to_string(),
      })
    }
  }

  /// Canonical spelling.
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Add => "add",
      Self::NtdsSchemaAdd => "ntdsSchemaAdd",
    }
  }
}

impl std::fmt::Display for ChangeType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

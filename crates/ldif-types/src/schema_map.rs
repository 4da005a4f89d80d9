use std::collections::HashMap;

/// `attributeSyntax` OID of case-sensitive strings (`String(Case)`).
pub const SYNTAX_CASE_STRING: &str = "2.5.5.3";

/// `attributeSyntax` OID of case-insensitive teletex strings.
pub const SYNTAX_TELETEX_STRING: &str = "2.5.5.4";

/// `attributeSyntax` OID of Unicode strings (`String(Unicode)`).
pub const SYNTAX_UNICODE_STRING: &str = "2.5.5.12";

/// Syntaxes whose Base64 values are decoded to text on import.
pub const TEXT_SYNTAXES: [&str; 3] = [
  SYNTAX_CASE_STRING,
  SYNTAX_TELETEX_STRING,
  SYNTAX_UNICODE_STRING,
];

/// Caller-supplied table of attribute name → attribute syntax OID.
///
/// The decoder consults it only for values written in `::` notation:
/// if the attribute's syntax is one of [`TEXT_SYNTAXES`] the Base64
/// payload is decoded to text, otherwise it is kept as-is.
///
/// Lookups ignore ASCII case, like attribute names in LDIF.
///
/// ```rust
/// use ldif_types::SchemaMap;
///
/// let map: SchemaMap = [("displayName", "2.5.5.12"), ("objectSid", "2.5.5.17")]
///   .into_iter()
///   .collect();
///
/// assert!(map.is_text_syntax("DISPLAYNAME"));
/// assert!(!map.is_text_syntax("objectSid"));
/// assert!(!map.is_text_syntax("cn"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaMap {
  syntaxes: HashMap<String, String>,
}

impl SchemaMap {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the syntax OID for `name`, returning the previous one.
  pub fn insert(&mut self, name: &str, syntax: impl Into<String>) -> Option<String> {
    self.syntaxes.insert(name.to_ascii_lowercase(), syntax.into())
  }

  /// Syntax OID for `name`, if the map has one.
  #[must_use]
  pub fn syntax_of(&self, name: &str) -> Option<&str> {
    self
      .syntaxes
      .get(&name.to_ascii_lowercase())
      .map(String::as_str)
  }

  /// `true` when `name` maps to one of the [`TEXT_SYNTAXES`].
  #[must_use]
  pub fn is_text_syntax(&self, name: &str) -> bool {
    self
      .syntax_of(name)
      .is_some_and(|oid| TEXT_SYNTAXES.contains(&oid))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.syntaxes.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.syntaxes.is_empty()
  }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for SchemaMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = Self::new();
    map.extend(iter);
    map
  }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for SchemaMap {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (name, syntax) in iter {
      self.insert(name.as_ref(), syntax);
    }
  }
}

//! Distinguished-name helpers.

/// Split a DN into its RDN components on every comma that is not
/// directly preceded by a backslash.
///
/// ```rust
/// use ldif_types::dn::split_rdns;
///
/// assert_eq!(
///   split_rdns(r"cn=Smith\, John,ou=People,dc=example"),
///   vec![r"cn=Smith\, John", "ou=People", "dc=example"]
/// );
/// ```
#[must_use]
pub fn split_rdns(dn: &str) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut start = 0;
  let mut previous = None;

  for (index, ch) in dn.char_indices() {
    if ch == ',' && previous != Some('\\') {
      parts.push(&dn[start..index]);
      start = index + 1;
    }
    previous = Some(ch);
  }
  parts.push(&dn[start..]);
  parts
}

/// The DN with its RDN order reversed, root first.
///
/// Sorting entries by this key groups children under their parents.
///
/// ```rust
/// use ldif_types::dn::reverse_dn;
///
/// assert_eq!(reverse_dn("cn=x,ou=People,dc=example"), "dc=example,ou=People,cn=x");
/// ```
#[must_use]
pub fn reverse_dn(dn: &str) -> String {
  let mut parts = split_rdns(dn);
  parts.reverse();
  parts.join(",")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_rdn_is_unchanged() {
    assert_eq!(reverse_dn("dc=com"), "dc=com");
  }

  #[test]
  fn escaped_commas_are_not_separators() {
    assert_eq!(
      reverse_dn(r"cn=Doe\, Jane,dc=example,dc=com"),
      r"dc=com,dc=example,cn=Doe\, Jane"
    );
  }

  #[test]
  fn empty_components_are_preserved() {
    assert_eq!(split_rdns("a,,b"), vec!["a", "", "b"]);
    assert_eq!(split_rdns(""), vec![""]);
  }

  #[test]
  fn non_ascii_values_split_on_char_boundaries() {
    assert_eq!(reverse_dn("cn=Zoë,o=Ünïcode"), "o=Ünïcode,cn=Zoë");
  }
}

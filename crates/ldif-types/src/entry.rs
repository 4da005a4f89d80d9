use ldif_wire::grammar::is_attribute_name;

use crate::change_type::ChangeType;
use crate::dn;
use crate::error::TypeError;
use crate::value::AttrValue;

/// Name of the distinguished-name field.
pub const DN: &str = "dn";
/// Name of the change record directive.
pub const CHANGETYPE: &str = "changetype";
/// Name of the schema class list.
pub const OBJECT_CLASS: &str = "objectClass";
/// Name of the bookkeeping field used by diff tooling; never written.
pub const SIDE_INDICATOR: &str = "sideIndicator";

/// Advisory flags describing how an entry was decoded.
///
/// Both are hints for downstream consumers (e.g. to route entries with
/// converted values through extra review); neither changes the entry's
/// structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryFlags {
  /// The DN arrived as `dn::` Base64 and was decoded.
  pub dn_base64: bool,
  /// At least one attribute value was decoded from Base64 to text.
  pub contains_base64: bool,
}

/// One named attribute in an entry's generic attribute list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
  /// Name as first seen in the source; later occurrences may differ in
  /// case but do not change it.
  pub name: String,
  pub value: AttrValue,
}

/// A single LDIF record.
///
/// The DN, changetype, objectClass list and side indicator are fixed
/// fields; everything else lives in an ordered list of [`Attribute`]s.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────┐
/// │ Field           │ Written as                                   │
/// ├─────────────────┼──────────────────────────────────────────────┤
/// │ dn              │ first line, always                           │
/// │ change_type     │ second line, if set                          │
/// │ object_classes  │ one line per class, in order                 │
/// │ attributes      │ insertion order, one line per value          │
/// │ side_indicator  │ never written                                │
/// └─────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Attribute identity is the pair (name ignoring ASCII case,
/// binary-origin or not): a text `photo` and an undecoded `photo::`
/// value are kept apart, so neither is silently re-encoded as the
/// other on output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
  dn: String,
  change_type: Option<String>,
  object_classes: Vec<String>,
  attributes: Vec<Attribute>,
  side_indicator: Option<String>,
  flags: EntryFlags,
}

impl Entry {
  /// Create an entry with the given DN and no attributes.
  #[must_use]
  pub fn new(dn: impl Into<String>) -> Self {
    Self {
      dn: dn.into(),
      change_type: None,
      object_classes: Vec::new(),
      attributes: Vec::new(),
      side_indicator: None,
      flags: EntryFlags::default(),
    }
  }

  /// Like [`new`](Self::new), but rejects a blank DN.
  ///
  /// # Errors
  ///
  /// [`TypeError::EmptyDn`] if `dn` is empty or whitespace only.
  pub fn try_new(dn: impl Into<String>) -> Result<Self, TypeError> {
    let dn = dn.into();
    if dn.trim().is_empty() {
      return Err(TypeError::EmptyDn);
    }
    Ok(Self::new(dn))
  }

  #[must_use]
  pub fn dn(&self) -> &str {
    &self.dn
  }

  /// The DN with RDNs in reverse order (see [`dn::reverse_dn`]).
  #[must_use]
  pub fn reversed_dn(&self) -> String {
    dn::reverse_dn(&self.dn)
  }

  /// The changetype exactly as it was given.
  #[must_use]
  pub fn change_type(&self) -> Option<&str> {
    self.change_type.as_deref()
  }

  /// The parsed changetype. Always `Some` when
  /// [`change_type`](Self::change_type) is, since values are validated
  /// on the way in.
  #[must_use]
  pub fn change_kind(&self) -> Option<ChangeType> {
    self
      .change_type
      .as_deref()
      .and_then(|value| ChangeType::parse(value).ok())
  }

  /// Set the changetype, keeping the caller's spelling.
  ///
  /// # Errors
  ///
  /// [`TypeError::InvalidChangeType`] unless the value is `add` or
  /// `ntdsSchemaAdd` (any case).
  pub fn set_change_type(&mut self, value: impl Into<String>) -> Result<(), TypeError> {
    let value = value.into();
    ChangeType::parse(&value)?;
    self.change_type = Some(value);
    Ok(())
  }

  #[must_use]
  pub fn object_classes(&self) -> &[String] {
    &self.object_classes
  }

  pub fn push_object_class(&mut self, class: impl Into<String>) {
    self.object_classes.push(class.into());
  }

  #[must_use]
  pub fn side_indicator(&self) -> Option<&str> {
    self.side_indicator.as_deref()
  }

  pub fn set_side_indicator(&mut self, value: impl Into<String>) {
    self.side_indicator = Some(value.into());
  }

  #[must_use]
  pub fn flags(&self) -> EntryFlags {
    self.flags
  }

  pub fn mark_dn_base64(&mut self) {
    self.flags.dn_base64 = true;
  }

  pub fn mark_contains_base64(&mut self) {
    self.flags.contains_base64 = true;
  }

  /// Add one text value, routing the fixed fields to their slots.
  ///
  /// ```text
  ///   changetype    → validated, first one wins
  ///   objectClass   → push_object_class
  ///   sideIndicator → set_side_indicator (replaces)
  ///   anything else → generic merge (Scalar → List on repeat)
  /// ```
  ///
  /// # Errors
  ///
  /// - [`TypeError::ReservedAttribute`] for `dn`.
  /// - [`TypeError::InvalidAttributeName`] if `name` is not a valid
  ///   attribute name.
  /// - [`TypeError::InvalidChangeType`] from the changetype gate.
  /// - [`TypeError::DuplicateChangeType`] for a valid changetype when
  ///   one is already set. The stored value is left alone; use
  ///   [`set_change_type`](Self::set_change_type) to replace it.
  pub fn add_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), TypeError> {
    check_name(name)?;
    let value = value.into();

    if name.eq_ignore_ascii_case(CHANGETYPE) {
      ChangeType::parse(&value)?;
      if self.change_type.is_some() {
        return Err(TypeError::DuplicateChangeType { value });
      }
      self.change_type = Some(value);
      Ok(())
    } else if name.eq_ignore_ascii_case(OBJECT_CLASS) {
      self.push_object_class(value);
      Ok(())
    } else if name.eq_ignore_ascii_case(SIDE_INDICATOR) {
      self.set_side_indicator(value);
      Ok(())
    } else {
      self.merge(name, value, false);
      Ok(())
    }
  }

  /// Add one undecoded binary-origin payload.
  ///
  /// Binary values never land in the fixed fields; they are always kept
  /// in the generic list under their own identity.
  ///
  /// # Errors
  ///
  /// Same name checks as [`add_value`](Self::add_value).
  pub fn add_binary(&mut self, name: &str, payload: impl Into<String>) -> Result<(), TypeError> {
    check_name(name)?;
    self.merge(name, payload.into(), true);
    Ok(())
  }

  /// Replace (or insert) an attribute wholesale.
  ///
  /// # Errors
  ///
  /// [`TypeError::ReservedAttribute`] for any of the fixed field names,
  /// [`TypeError::InvalidAttributeName`] for malformed names.
  pub fn set(&mut self, name: &str, value: AttrValue) -> Result<(), TypeError> {
    check_name(name)?;
    if [CHANGETYPE, OBJECT_CLASS, SIDE_INDICATOR]
      .iter()
      .any(|fixed| name.eq_ignore_ascii_case(fixed))
    {
      return Err(TypeError::ReservedAttribute {
        name: name.to_string(),
      });
    }

    let binary = value.is_binary();
    match self.position(name, binary) {
      Some(index) => self.attributes[index].value = value,
      None => self.attributes.push(Attribute {
        name: name.to_string(),
        value,
      }),
    }
    Ok(())
  }

  /// The text attribute called `name` (ASCII case ignored).
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&AttrValue> {
    self
      .position(name, false)
      .map(|index| &self.attributes[index].value)
  }

  /// The undecoded binary-origin attribute called `name`.
  #[must_use]
  pub fn get_binary(&self, name: &str) -> Option<&AttrValue> {
    self
      .position(name, true)
      .map(|index| &self.attributes[index].value)
  }

  /// Remove and return an attribute.
  pub fn remove(&mut self, name: &str, binary: bool) -> Option<AttrValue> {
    self
      .position(name, binary)
      .map(|index| self.attributes.remove(index).value)
  }

  /// The generic attributes, in insertion order. The fixed fields are
  /// not included.
  pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
    self.attributes.iter()
  }

  /// Number of generic attributes.
  #[must_use]
  pub fn attribute_count(&self) -> usize {
    self.attributes.len()
  }

  fn position(&self, name: &str, binary: bool) -> Option<usize> {
    self
      .attributes
      .iter()
      .position(|a| a.value.is_binary() == binary && a.name.eq_ignore_ascii_case(name))
  }

  fn merge(&mut self, name: &str, value: String, binary: bool) {
    if let Some(index) = self.position(name, binary) {
      self.attributes[index].value.push(value);
      return;
    }
    let value = if binary {
      AttrValue::binary(value)
    } else {
      AttrValue::Scalar(value)
    };
    self.attributes.push(Attribute {
      name: name.to_string(),
      value,
    });
  }
}

fn check_name(name: &str) -> Result<(), TypeError> {
  if name.eq_ignore_ascii_case(DN) {
    return Err(TypeError::ReservedAttribute {
      name: name.to_string(),
    });
  }
  if !is_attribute_name(name) {
    return Err(TypeError::InvalidAttributeName {
      name: name.to_string(),
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn repeated_attribute_merges_in_order() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("mail", "a").unwrap();
    entry.add_value("mail", "b").unwrap();
    entry.add_value("mail", "c").unwrap();
    assert_eq!(
      entry.get("mail"),
      Some(&AttrValue::List(vec!["a".into(), "b".into(), "c".into()]))
    );
  }

  #[test]
  fn first_seen_case_is_kept() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("givenName", "a").unwrap();
    entry.add_value("GIVENNAME", "b").unwrap();
    let attrs: Vec<_> = entry.attributes().collect();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].name, "givenName");
    assert_eq!(entry.get("givenname").unwrap().len(), 2);
  }

  #[test]
  fn fixed_fields_are_routed() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("objectclass", "top").unwrap();
    entry.add_value("objectClass", "person").unwrap();
    entry.add_value("ChangeType", "Add").unwrap();
    entry.add_value("sideIndicator", "=>").unwrap();

    assert_eq!(entry.object_classes(), ["top", "person"]);
    assert_eq!(entry.change_type(), Some("Add"));
    assert_eq!(entry.change_kind(), Some(ChangeType::Add));
    assert_eq!(entry.side_indicator(), Some("=>"));
    assert_eq!(entry.attribute_count(), 0);
  }

  #[test]
  fn second_changetype_is_rejected_and_first_kept() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("changetype", "add").unwrap();
    let err = entry.add_value("changeType", "ntdsSchemaAdd").unwrap_err();
    assert!(matches!(err, TypeError::DuplicateChangeType { ref value } if value == "ntdsSchemaAdd"));
    assert_eq!(entry.change_type(), Some("add"));

    // An invalid value is still an invalid value, duplicate or not.
    assert!(matches!(
      entry.add_value("changetype", "delete"),
      Err(TypeError::InvalidChangeType { .. })
    ));

    entry.set_change_type("ntdsSchemaAdd").unwrap();
    assert_eq!(entry.change_type(), Some("ntdsSchemaAdd"));
  }

  #[test]
  fn invalid_changetype_is_rejected_and_not_stored() {
    let mut entry = Entry::new("cn=x");
    let err = entry.add_value("changetype", "delete").unwrap_err();
    assert!(matches!(err, TypeError::InvalidChangeType { .. }));
    assert_eq!(entry.change_type(), None);
  }

  #[test]
  fn text_and_binary_with_same_name_are_separate() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("photo", "inline").unwrap();
    entry.add_binary("photo", "AAEC").unwrap();
    entry.add_binary("Photo", "AwQF").unwrap();

    assert_eq!(entry.get("photo"), Some(&AttrValue::from("inline")));
    assert_eq!(
      entry.get_binary("photo"),
      Some(&AttrValue::Binary(vec!["AAEC".into(), "AwQF".into()]))
    );
    assert_eq!(entry.attribute_count(), 2);
  }

  #[test]
  fn dn_cannot_be_added_as_attribute() {
    let mut entry = Entry::new("cn=x");
    assert!(matches!(
      entry.add_value("DN", "cn=y"),
      Err(TypeError::ReservedAttribute { .. })
    ));
  }

  #[test]
  fn bad_names_are_rejected() {
    let mut entry = Entry::new("cn=x");
    assert!(matches!(
      entry.add_value("mail_binary", "x"),
      Err(TypeError::InvalidAttributeName { .. })
    ));
    assert!(matches!(
      entry.add_binary("", "x"),
      Err(TypeError::InvalidAttributeName { .. })
    ));
  }

  #[test]
  fn set_replaces_and_refuses_fixed_fields() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("sn", "old").unwrap();
    entry.set("SN", AttrValue::from("new")).unwrap();
    assert_eq!(entry.get("sn"), Some(&AttrValue::from("new")));
    assert_eq!(entry.attributes().next().unwrap().name, "sn");
    assert!(entry.set("objectClass", AttrValue::from("top")).is_err());
  }

  #[test]
  fn remove_returns_value() {
    let mut entry = Entry::new("cn=x");
    entry.add_value("sn", "a").unwrap();
    assert_eq!(entry.remove("SN", false), Some(AttrValue::from("a")));
    assert!(entry.get("sn").is_none());
    assert_eq!(entry.remove("sn", false), None);
  }

  #[test]
  fn try_new_rejects_blank_dn() {
    assert!(matches!(Entry::try_new("  "), Err(TypeError::EmptyDn)));
    assert_eq!(Entry::try_new("cn=x").unwrap().dn(), "cn=x");
  }

  #[test]
  fn flags_are_independent() {
    let mut entry = Entry::new("cn=x");
    entry.mark_contains_base64();
    assert_eq!(
      entry.flags(),
      EntryFlags {
        dn_base64: false,
        contains_base64: true
      }
    );
  }

  #[test]
  fn reversed_dn_uses_dn_helper() {
    assert_eq!(Entry::new("cn=a,dc=b").reversed_dn(), "dc=b,cn=a");
  }
}

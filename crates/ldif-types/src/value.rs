/// The value held by one attribute of an [`Entry`](crate::Entry).
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────┐
/// │ Variant  │ Meaning                                              │
/// ├──────────┼──────────────────────────────────────────────────────┤
/// │ Scalar   │ attribute seen once                                  │
/// │ List     │ attribute seen 2+ times, values in source order      │
/// │ Binary   │ read with `::` and left undecoded; payloads are the  │
/// │          │ raw Base64 text, one per occurrence                  │
/// └──────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// Text values start as `Scalar` and are promoted to `List` on the
/// second [`push`](Self::push). `Binary` is always a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
  Scalar(String),
  List(Vec<String>),
  Binary(Vec<String>),
}

impl AttrValue {
  /// A fresh binary-origin value holding a single payload.
  #[must_use]
  pub fn binary(payload: impl Into<String>) -> Self {
    Self::Binary(vec![payload.into()])
  }

  /// Append another occurrence, promoting `Scalar` to `List`.
  pub fn push(&mut self, value: String) {
    match self {
      Self::Scalar(first) => {
        let first = std::mem::take(first);
        *self = Self::List(vec![first, value]);
      }
      Self::List(values) | Self::Binary(values) => values.push(value),
    }
  }

  /// All values in order, regardless of variant.
  #[must_use]
  pub fn values(&self) -> &[String] {
    match self {
      Self::Scalar(value) => std::slice::from_ref(value),
      Self::List(values) | Self::Binary(values) => values,
    }
  }

  #[must_use]
  pub fn is_binary(&self) -> bool {
    matches!(self, Self::Binary(_))
  }

  /// The value if this is a `Scalar`.
  #[must_use]
  pub fn as_scalar(&self) -> Option<&str> {
    match self {
      Self::Scalar(value) => Some(value),
      _ => None,
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.values().len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values().is_empty()
  }
}

impl From<String> for AttrValue {
  fn from(value: String) -> Self {
    Self::Scalar(value)
  }
}

impl From<&str> for AttrValue {
  fn from(value: &str) -> Self {
    Self::Scalar(value.to_string())
  }
}

impl From<Vec<String>> for AttrValue {
  /// A single-element vector collapses to `Scalar`, matching what the
  /// decoder builds for an attribute seen once.
  fn from(mut values: Vec<String>) -> Self {
    if values.len() == 1 {
      Self::Scalar(values.remove(0))
    } else {
      Self::List(values)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalar_promotes_to_list_on_second_value() {
    let mut value = AttrValue::from("a");
    value.push("b".into());
    assert_eq!(value, AttrValue::List(vec!["a".into(), "b".into()]));
    value.push("c".into());
    assert_eq!(value.values(), ["a", "b", "c"]);
  }

  #[test]
  fn binary_stays_binary() {
    let mut value = AttrValue::binary("AAAA");
    value.push("BBBB".into());
    assert!(value.is_binary());
    assert_eq!(value.values(), ["AAAA", "BBBB"]);
  }

  #[test]
  fn values_of_scalar_is_one_element() {
    let value = AttrValue::from("x");
    assert_eq!(value.values(), ["x"]);
    assert_eq!(value.len(), 1);
    assert_eq!(value.as_scalar(), Some("x"));
  }

  #[test]
  fn from_vec_collapses_single_value() {
    assert_eq!(AttrValue::from(vec!["a".to_string()]), AttrValue::from("a"));
    assert!(matches!(
      AttrValue::from(vec!["a".to_string(), "b".to_string()]),
      AttrValue::List(_)
    ));
  }
}

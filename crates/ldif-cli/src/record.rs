//! JSON projection of an [`Entry`].
//!
//! ```text
//! ┌─────────────────┬──────────────────────────────────────────────┐
//! │ Key             │ Value                                        │
//! ├─────────────────┼──────────────────────────────────────────────┤
//! │ dn              │ string                                       │
//! │ changetype      │ string, if present                           │
//! │ objectClass     │ array of strings, if any                     │
//! │ <name>          │ string, or array when multi-valued           │
//! │ <name>_binary   │ undecoded `::` payload(s), same shape        │
//! │ sideIndicator   │ string, if present                           │
//! │ reverseDN       │ string (computed, see below)                 │
//! │ _flags          │ {"dnBase64": bool, "containsBase64": bool}   │
//! └─────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Attribute names cannot contain `_`, so the suffix never collides
//! with a real attribute.
//!
//! `reverseDN` can collide. When the entry has a real attribute of that
//! name, the attribute wins and no computed value is written. On the way
//! back a `reverseDN` key is dropped only if it equals the computed value
//! for the record's DN.

use anyhow::{Result, anyhow, bail};
use ldif_types::entry::{CHANGETYPE, DN, OBJECT_CLASS, SIDE_INDICATOR};
use ldif_types::{AttrValue, Entry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BINARY_SUFFIX: &str = "_binary";
pub const REVERSE_DN: &str = "reverseDN";
pub const FLAGS: &str = "_flags";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFlags {
    pub dn_base64: bool,
    pub contains_base64: bool,
}

/// Project an entry into a JSON object.
#[must_use]
pub fn to_record(entry: &Entry) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert(DN.into(), entry.dn().into());

    if let Some(change_type) = entry.change_type() {
        record.insert(CHANGETYPE.into(), change_type.into());
    }
    if !entry.object_classes().is_empty() {
        record.insert(OBJECT_CLASS.into(), entry.object_classes().into());
    }

    for attribute in entry.attributes() {
        let key = if attribute.value.is_binary() {
            format!("{}{BINARY_SUFFIX}", attribute.name)
        } else {
            attribute.name.clone()
        };
        record.insert(key, json_value(&attribute.value));
    }

    if let Some(side) = entry.side_indicator() {
        record.insert(SIDE_INDICATOR.into(), side.into());
    }
    if has_reverse_dn_attribute(entry) {
        tracing::warn!(
            dn = entry.dn(),
            "entry has a reverseDN attribute; computed value not written"
        );
    } else {
        record.insert(REVERSE_DN.into(), entry.reversed_dn().into());
    }

    let flags = entry.flags();
    let flags = RecordFlags {
        dn_base64: flags.dn_base64,
        contains_base64: flags.contains_base64,
    };
    // RecordFlags only holds bools, so this cannot fail.
    record.insert(FLAGS.into(), serde_json::to_value(flags).unwrap_or(Value::Null));
    record
}

fn has_reverse_dn_attribute(entry: &Entry) -> bool {
    entry
        .attributes()
        .any(|attribute| attribute.name.eq_ignore_ascii_case(REVERSE_DN))
}

fn json_value(value: &AttrValue) -> Value {
    match value.values() {
        [single] => Value::String(single.clone()),
        many => many.into(),
    }
}

/// Rebuild an entry from a JSON object. `index` is only used in error
/// messages.
///
/// # Errors
///
/// Returns an error if the record is not an object, has no string `dn`,
/// holds a nested object or array-of-non-scalars, or names an attribute
/// the entry model rejects (including an invalid changetype).
pub fn from_record(record: &Value, index: usize) -> Result<Entry> {
    let Value::Object(fields) = record else {
        bail!("record {index}: expected a JSON object");
    };

    let dn = match fields.get(DN) {
        Some(Value::String(dn)) => dn,
        _ => bail!("record {index}: missing string \"dn\""),
    };
    let mut entry = Entry::try_new(dn.as_str()).map_err(|e| anyhow!("record {index}: {e}"))?;

    let computed_reverse_dn = Value::String(entry.reversed_dn());
    for (key, value) in fields {
        if key == DN || key == FLAGS {
            continue;
        }
        if key == REVERSE_DN && *value == computed_reverse_dn {
            continue;
        }
        let values = scalars(value).ok_or_else(|| {
            anyhow!("record {index}: {key:?} must be a string, number, boolean or array of those")
        })?;

        let added = match key.strip_suffix(BINARY_SUFFIX) {
            Some(name) => values
                .into_iter()
                .try_for_each(|payload| entry.add_binary(name, payload)),
            None => values
                .into_iter()
                .try_for_each(|text| entry.add_value(key, text)),
        };
        added.map_err(|e| anyhow!("record {index} ({}): {e}", entry.dn()))?;
    }
    Ok(entry)
}

/// Flatten a JSON value into its text values. `null` yields nothing.
fn scalars(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => items.iter().map(scalar).collect(),
        other => scalar(other).map(|s| vec![s]),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

//! Base64 detection and the per-attribute decode decision.
//!
//! ```text
//!   notation  schema map   syntax in map      plausible  →  result
//!   ────────  ──────────   ────────────────   ─────────     ──────────────────
//!   Plain     any          any                any           Text(raw)
//!   Base64    none         -                  any           Binary(raw)
//!   Base64    some         absent / non-text  any           Text(raw)
//!   Base64    some         text syntax        yes           Text(decoded) ✓
//!   Base64    some         text syntax        no            Text(raw)
//! ```
//!
//! Only the ✓ row sets `decoded`, which in turn flags the entry as
//! containing converted Base64.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use ldif_types::SchemaMap;
use ldif_wire::ValueNotation;

/// Standard alphabet, tolerant of non-zero trailing bits in the last
/// quantum (many exporters emit those).
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Outcome of [`decide`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Store as a text value under the attribute's own name.
    Text { value: String, decoded: bool },
    /// Store as an undecoded binary-origin value.
    Binary(String),
}

/// Decide how a parsed attribute value is stored.
#[must_use]
pub fn decide(
    name: &str,
    raw: &str,
    notation: ValueNotation,
    schema: Option<&SchemaMap>,
) -> Decision {
    match (notation, schema) {
        (ValueNotation::Plain, _) => Decision::Text {
            value: raw.to_string(),
            decoded: false,
        },
        (ValueNotation::Base64, None) => Decision::Binary(raw.to_string()),
        (ValueNotation::Base64, Some(map)) => {
            if map.is_text_syntax(name) {
                if let Some(text) = decode_base64_text(raw) {
                    return Decision::Text {
                        value: text,
                        decoded: true,
                    };
                }
            }
            Decision::Text {
                value: raw.to_string(),
                decoded: false,
            }
        }
    }
}

/// `true` when `value`, trimmed, has a length divisible by four and
/// matches `[A-Za-z0-9+/]*={0,3}`.
///
/// This is a plausibility test, not a guarantee:
/// [`decode_base64_text`] can still reject e.g. `"A==="`.
#[must_use]
pub fn is_base64_plausible(value: &str) -> bool {
    let value = value.trim();
    if value.len() % 4 != 0 {
        return false;
    }
    let body = value.trim_end_matches('=');
    value.len() - body.len() <= 3
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Decode a plausible Base64 string to UTF-8 text.
///
/// Returns `None` if the value is not plausible, does not decode, or
/// decodes to bytes that are not valid UTF-8.
#[must_use]
pub fn decode_base64_text(value: &str) -> Option<String> {
    if !is_base64_plausible(value) {
        return None;
    }
    let bytes = LENIENT_STANDARD.decode(value.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

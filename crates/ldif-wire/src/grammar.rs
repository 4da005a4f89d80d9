//! Line-level LDIF grammar.
//!
//! Every logical line handed out by the [`LineReader`](crate::LineReader)
//! falls into exactly one of the [`ParsedLine`] shapes:
//!
//! ```text
//! ┌───────────────┬──────────────────────────────────────────────┐
//! │ Shape         │ Pattern                                      │
//! ├───────────────┼──────────────────────────────────────────────┤
//! │ Blank         │ ^\s*$                                        │
//! │ Dn            │ ^dn::?\s(.+)$              (case-insensitive) │
//! │ Attribute     │ ^<name>:\s(.+)$                              │
//! │               │ ^<name>(;binary)?::\s(.+)$                   │
//! │ Invalid       │ anything else                                │
//! └───────────────┴──────────────────────────────────────────────┘
//!
//! <name> = [a-zA-Z][-a-zA-Z0-9;]*
//! ```
//!
//! The patterns are compiled once per process and never mutated.

use std::sync::LazyLock;

use regex::Regex;

static DN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^dn(::?)\s(.+)$").expect("DN_LINE is a valid regex pattern")
});

static PLAIN_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][-a-z0-9;]*?):\s(.+)$")
        .expect("PLAIN_ATTRIBUTE is a valid regex pattern")
});

static BINARY_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][-a-z0-9;]*?)(;binary)?::\s(.+)$")
        .expect("BINARY_ATTRIBUTE is a valid regex pattern")
});

static VERSION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^version.+$").expect("VERSION_MARKER is a valid regex pattern")
});

static ATTRIBUTE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][-a-z0-9;]*$").expect("ATTRIBUTE_NAME is a valid regex pattern")
});

/// How a value was written on the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueNotation {
    /// `name: value`, the value is the literal text.
    Plain,
    /// `name:: value`, the value is (claimed to be) Base64.
    Base64,
}

/// An attribute line split into its parts. All slices borrow the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrLine<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub notation: ValueNotation,
    /// `true` when the name carried the `;binary` option, which is
    /// stripped from `name`.
    pub binary_option: bool,
}

/// Classification of one logical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Blank,
    Dn {
        value: &'a str,
        notation: ValueNotation,
    },
    Attribute(AttrLine<'a>),
    /// Matches neither attribute grammar.
    Invalid,
}

impl<'a> ParsedLine<'a> {
    /// Classify a logical line.
    ///
    /// The DN grammar is tried first, then blank, then the plain
    /// attribute grammar, then the binary one.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        if let Some(caps) = DN_LINE.captures(line) {
            let notation = if caps.get(1).map_or(0, |m| m.len()) == 2 {
                ValueNotation::Base64
            } else {
                ValueNotation::Plain
            };
            if let Some(value) = caps.get(2) {
                return Self::Dn {
                    value: value.as_str(),
                    notation,
                };
            }
        }

        if is_blank(line) {
            return Self::Blank;
        }

        if let Some(caps) = PLAIN_ATTRIBUTE.captures(line) {
            if let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) {
                return Self::Attribute(AttrLine {
                    name: name.as_str(),
                    value: value.as_str(),
                    notation: ValueNotation::Plain,
                    binary_option: false,
                });
            }
        }

        if let Some(caps) = BINARY_ATTRIBUTE.captures(line) {
            if let (Some(name), Some(value)) = (caps.get(1), caps.get(3)) {
                return Self::Attribute(AttrLine {
                    name: name.as_str(),
                    value: value.as_str(),
                    notation: ValueNotation::Base64,
                    binary_option: caps.get(2).is_some(),
                });
            }
        }

        Self::Invalid
    }
}

/// `true` for an empty or whitespace-only line (a record terminator).
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// `true` for a `version: ...` header line.
#[must_use]
pub fn is_version_marker(line: &str) -> bool {
    VERSION_MARKER.is_match(line)
}

/// `true` for a `#` comment line.
#[must_use]
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// `true` if `name` is a syntactically valid attribute name.
#[must_use]
pub fn is_attribute_name(name: &str) -> bool {
    ATTRIBUTE_NAME.is_match(name)
}

use chrono::{DateTime, SecondsFormat, Utc};
use ldif_wire::TextEncoding;

/// Smallest accepted fold width. One byte of payload per line plus the
/// leading continuation space.
pub const MIN_FOLD_WIDTH: usize = 2;

/// Line terminator written after every physical line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Optional comment line written before the first entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderComment {
    #[default]
    Omit,
    /// `# Generated <RFC 3339 timestamp>`. `None` means "now"; pass a
    /// fixed time for reproducible output.
    Timestamp(Option<DateTime<Utc>>),
}

impl HeaderComment {
    /// The comment text, without the leading `#` and line ending.
    #[must_use]
    pub fn render(self) -> Option<String> {
        match self {
            Self::Omit => None,
            Self::Timestamp(at) => {
                let at = at.unwrap_or_else(Utc::now);
                Some(format!(
                    "Generated {}",
                    at.to_rfc3339_opts(SecondsFormat::Secs, true)
                ))
            }
        }
    }
}

/// Output settings for [`LdifWriter`](crate::LdifWriter).
///
/// ```text
/// ┌─────────────┬──────────┬─────────────────────────────────────────┐
/// │ Field       │ Default  │ Effect                                  │
/// ├─────────────┼──────────┼─────────────────────────────────────────┤
/// │ encoding    │ Utf8     │ Utf16 writes UTF-16LE with a BOM        │
/// │ line_ending │ Lf       │ terminator of every physical line       │
/// │ fold_width  │ None     │ wrap lines longer than N bytes          │
/// │ header      │ Omit     │ `# Generated ...` before the first entry│
/// └─────────────┴──────────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterConfig {
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
    /// Maximum physical line length in bytes, including the leading
    /// space of continuation lines. Clamped to [`MIN_FOLD_WIDTH`].
    pub fold_width: Option<usize>,
    pub header: HeaderComment,
}

impl WriterConfig {
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    #[must_use]
    pub fn with_fold_width(mut self, width: usize) -> Self {
        self.fold_width = Some(width.max(MIN_FOLD_WIDTH));
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: HeaderComment) -> Self {
        self.header = header;
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn fixed_timestamp_renders_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        assert_eq!(
            HeaderComment::Timestamp(Some(at)).render().as_deref(),
            Some("Generated 2024-05-01T08:30:00Z")
        );
        assert_eq!(HeaderComment::Omit.render(), None);
    }

    #[test]
    fn fold_width_is_clamped() {
        assert_eq!(WriterConfig::default().with_fold_width(0).fold_width, Some(2));
        assert_eq!(WriterConfig::default().with_fold_width(76).fold_width, Some(76));
    }
}

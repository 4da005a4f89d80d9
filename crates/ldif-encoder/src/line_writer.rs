use crate::config::{LineEnding, MIN_FOLD_WIDTH};
use crate::error::EncodeError;

/// Attribute-line serializer.
///
/// `LineWriter` accumulates LDIF text for one or more records in an
/// internal buffer and hands it over with [`take`](Self::take) or
/// [`finish`](Self::finish). Encoding to the output character set
/// happens later, in [`LdifWriter`](crate::LdifWriter).
///
/// Line shapes:
///
/// ```text
/// ┌──────────────────┬───────────────────────────────┐
/// │ Method           │ Output                        │
/// ├──────────────────┼───────────────────────────────┤
/// │ write_value      │ name: value⏎                  │
/// │ write_base64     │ name:: payload⏎               │
/// │ write_comment    │ # text⏎                       │
/// │ write_blank      │ ⏎                             │
/// └──────────────────┴───────────────────────────────┘
/// ```
///
/// With a fold width, long lines are wrapped RFC 2849 style: the first
/// physical line holds `width` bytes, each continuation line holds a
/// single space plus `width - 1` bytes. Splits never fall inside a
/// UTF-8 sequence.
pub struct LineWriter {
    buf: String,
    line_ending: LineEnding,
    fold_width: Option<usize>,
}

impl LineWriter {
    #[must_use]
    pub fn new(line_ending: LineEnding, fold_width: Option<usize>) -> Self {
        Self {
            buf: String::new(),
            line_ending,
            fold_width: fold_width.map(|w| w.max(MIN_FOLD_WIDTH)),
        }
    }

    /// Write `name: value`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::LineBreakInValue`] if `value` contains CR or LF.
    pub fn write_value(&mut self, name: &str, value: &str) -> Result<(), EncodeError> {
        check_single_line(name, value)?;
        self.write_line(&format!("{name}: {value}"));
        Ok(())
    }

    /// Write `name:: payload`. The payload is written as given; it is
    /// not re-encoded.
    ///
    /// # Errors
    ///
    /// [`EncodeError::LineBreakInValue`] if `payload` contains CR or LF.
    pub fn write_base64(&mut self, name: &str, payload: &str) -> Result<(), EncodeError> {
        check_single_line(name, payload)?;
        self.write_line(&format!("{name}:: {payload}"));
        Ok(())
    }

    /// Write a `#` comment line. Line breaks in `text` are replaced with
    /// spaces. Comments are never folded.
    pub fn write_comment(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        self.buf.push_str("# ");
        self.buf.push_str(&text);
        self.end_line();
    }

    /// Write the blank line that terminates a record.
    pub fn write_blank(&mut self) {
        self.end_line();
    }

    /// Bytes buffered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Hand over the buffered text and keep the writer for reuse.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }

    /// Consume the writer and return the buffered text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }

    fn write_line(&mut self, line: &str) {
        let Some(width) = self.fold_width else {
            self.buf.push_str(line);
            self.end_line();
            return;
        };

        let mut rest = line;
        let mut limit = width;
        loop {
            if rest.len() <= limit {
                self.buf.push_str(rest);
                self.end_line();
                return;
            }

            let mut cut = limit;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            if cut == 0 {
                // A single character wider than the limit.
                cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }

            self.buf.push_str(&rest[..cut]);
            self.end_line();
            self.buf.push(' ');
            rest = &rest[cut..];
            limit = width - 1;
        }
    }

    fn end_line(&mut self) {
        self.buf.push_str(self.line_ending.as_str());
    }
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new(LineEnding::Lf, None)
    }
}

fn check_single_line(name: &str, value: &str) -> Result<(), EncodeError> {
    if value.contains(['\r', '\n']) {
        return Err(EncodeError::LineBreakInValue {
            attribute: name.to_string(),
        });
    }
    Ok(())
}

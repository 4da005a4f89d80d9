use std::io::{self, BufRead};

use crate::error::WireError;
use crate::grammar;

/// One logical LDIF line: continuation lines already folded in, line
/// terminator stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// 1-based physical line number where this logical line starts.
    pub line_number: usize,
}

/// Pull-based reader that turns physical lines into logical lines.
///
/// Responsibilities, in the order they apply:
///
/// ```text
///   1. skip a leading run of ' ', '\t', '\r', '\n' (once, at stream start)
///   2. read a physical line, strip "\n" / "\r\n" and, on the very
///      first line, a U+FEFF byte-order mark
///   3. fold every following line that starts with ' ' (space dropped,
///      remainder appended with no separator)
///   4. drop `version...` markers and `#` comments
///   5. after a blank line, swallow following CR-only lines
/// ```
///
/// Lookahead is one byte (via [`BufRead::fill_buf`]) plus at most one
/// already-read physical line. Physical lines are pulled from the
/// buffer chunk by chunk, so with
/// [`with_max_line_length`](Self::with_max_line_length) set, an
/// over-long line fails once the limit is passed instead of after the
/// whole line has been buffered.
pub struct LineReader<R> {
    inner: R,
    started: bool,
    strip_bom: bool,
    /// Physical lines consumed so far.
    line_number: usize,
    max_line_length: Option<usize>,
    /// A physical line read while looking for CR-only lines that turned
    /// out to be real content.
    pending: Option<String>,
    scratch: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            started: false,
            strip_bom: true,
            line_number: 0,
            max_line_length: None,
            pending: None,
            scratch: Vec::new(),
        }
    }

    /// Fail with [`WireError::LineTooLong`] once a logical line exceeds
    /// `limit` bytes. Reading stops within one buffer fill of the limit.
    #[must_use]
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next logical line, or `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// [`WireError::Io`] if the underlying reader fails (including
    /// invalid UTF-8 from a raw reader), [`WireError::LineTooLong`] if
    /// the configured limit is exceeded.
    pub fn next_line(&mut self) -> Result<Option<LogicalLine>, WireError> {
        if !self.started {
            self.skip_leading_whitespace()?;
            self.started = true;
        }

        loop {
            let Some(mut text) = self.read_physical(self.line_number + 1, self.max_line_length)?
            else {
                return Ok(None);
            };
            let start = self.line_number;
            self.check_length(&text, start)?;

            while self.peek_byte()? == Some(b' ') {
                // The leading space is dropped, so it does not count.
                let budget = self
                    .max_line_length
                    .map(|limit| limit.saturating_sub(text.len()) + 1);
                let Some(continuation) = self.read_physical(start, budget)? else {
                    break;
                };
                // The peeked byte is an ASCII space, so slicing at 1 is safe.
                text.push_str(&continuation[1..]);
                self.check_length(&text, start)?;
            }

            if grammar::is_version_marker(&text) || grammar::is_comment(&text) {
                continue;
            }

            if grammar::is_blank(&text) {
                self.skip_carriage_return_lines()?;
            }

            return Ok(Some(LogicalLine {
                text,
                line_number: start,
            }));
        }
    }

    fn check_length(&self, text: &str, line: usize) -> Result<(), WireError> {
        match self.max_line_length {
            Some(limit) if text.len() > limit => Err(WireError::LineTooLong { line, limit }),
            _ => Ok(()),
        }
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, WireError> {
        Ok(fill_buf(&mut self.inner)?.first().copied())
    }

    /// Read one physical line with its terminator removed.
    ///
    /// `budget` caps the line's length in bytes, terminator excluded;
    /// `start` is the logical line reported when the cap is passed.
    fn read_physical(
        &mut self,
        start: usize,
        budget: Option<usize>,
    ) -> Result<Option<String>, WireError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        self.scratch.clear();
        loop {
            let buf = fill_buf(&mut self.inner)?;
            if buf.is_empty() {
                break;
            }
            let (take, complete) = match buf.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (buf.len(), false),
            };
            self.scratch.extend_from_slice(&buf[..take]);
            self.inner.consume(take);

            if let (Some(budget), Some(limit)) = (budget, self.max_line_length) {
                // Up to two bytes of "\r\n" are not part of the line.
                if self.scratch.len() > budget.saturating_add(2) {
                    self.scratch.clear();
                    return Err(WireError::LineTooLong { line: start, limit });
                }
            }
            if complete {
                break;
            }
        }

        if self.scratch.is_empty() {
            return Ok(None);
        }
        self.line_number += 1;

        if self.scratch.ends_with(b"\n") {
            self.scratch.pop();
            if self.scratch.ends_with(b"\r") {
                self.scratch.pop();
            }
        }
        let mut text = String::from_utf8(std::mem::take(&mut self.scratch))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if self.strip_bom {
            self.strip_bom = false;
            if let Some(rest) = text.strip_prefix('\u{FEFF}') {
                text = rest.to_string();
            }
        }
        Ok(Some(text))
    }

    fn skip_leading_whitespace(&mut self) -> Result<(), WireError> {
        loop {
            let buf = fill_buf(&mut self.inner)?;
            if buf.is_empty() {
                return Ok(());
            }
            let skip = buf
                .iter()
                .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
                .count();
            let newlines = buf[..skip].iter().filter(|&&b| b == b'\n').count();
            let exhausted = skip == buf.len();

            self.inner.consume(skip);
            self.line_number += newlines;

            if !exhausted {
                return Ok(());
            }
        }
    }

    /// Drop lines made only of `\r`. The first line that holds anything
    /// else is kept in `pending` for the next call.
    fn skip_carriage_return_lines(&mut self) -> Result<(), WireError> {
        while self.peek_byte()? == Some(b'\r') {
            let Some(line) = self.read_physical(self.line_number + 1, self.max_line_length)?
            else {
                break;
            };
            if !line.bytes().all(|b| b == b'\r') {
                self.pending = Some(line);
                break;
            }
        }
        Ok(())
    }
}

/// `BufRead::fill_buf`, retried on `Interrupted`.
fn fill_buf<R: BufRead>(inner: &mut R) -> io::Result<&[u8]> {
    loop {
        match inner.fill_buf() {
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    // Already filled, so this returns the buffer without reading.
    inner.fill_buf()
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<LogicalLine, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

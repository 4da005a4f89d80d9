use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ldif_types::Entry;
use ldif_wire::{LineReader, TranscodingReader};

use crate::config::DecoderConfig;
use crate::entry_builder::EntryBuilder;
use crate::error::{DecodeError, EntryError};

/// Events emitted by the streaming reader.
///
/// Entries and diagnostics are interleaved in input order:
///
/// ```text
///   Entry(cn=a)
///   Diagnostic(InvalidLine { line: 7, .. })
///   Entry(cn=b)
///   Diagnostic(InvalidChangeType { line: 12, .. })   ← cn=c dropped
///   Entry(cn=d)
///   ... (stream ends at end of input)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderEvent {
  /// A record has been fully assembled.
  Entry(Entry),

  /// A recoverable problem; decoding continues.
  Diagnostic(EntryError),
}

/// Streaming LDIF reader: yields entries one at a time without
/// buffering the whole input.
///
/// Memory use is bounded by the largest single entry (plus the longest
/// logical line). Backpressure is natural: nothing is read until the
/// caller asks for the next event.
///
/// # Example
///
/// ```rust
/// use ldif_decoder::{DecoderEvent, LdifReader};
///
/// let input = "dn: cn=a\ncn: a\n\ndn: cn=b\ncn: b\n";
/// let dns: Vec<String> = LdifReader::new(input.as_bytes())
///   .filter_map(|event| match event.unwrap() {
///     DecoderEvent::Entry(entry) => Some(entry.dn().to_string()),
///     DecoderEvent::Diagnostic(_) => None,
///   })
///   .collect();
///
/// assert_eq!(dns, ["cn=a", "cn=b"]);
/// ```
pub struct LdifReader<R> {
  lines: LineReader<R>,
  builder: EntryBuilder,
  done: bool,
}

impl<R: BufRead> LdifReader<R> {
  /// Read UTF-8 text with the default configuration.
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self::with_config(reader, DecoderConfig::default())
  }

  /// Read UTF-8 text with an explicit configuration.
  ///
  /// `config.encoding` is ignored here; use
  /// [`from_reader`](LdifReader::from_reader) for byte input that may
  /// need transcoding.
  #[must_use]
  pub fn with_config(reader: R, config: DecoderConfig) -> Self {
    let mut lines = LineReader::new(reader);
    if let Some(limit) = config.max_line_length {
      lines = lines.with_max_line_length(limit);
    }
    Self {
      lines,
      builder: EntryBuilder::new(config.schema_map),
      done: false,
    }
  }

  /// Read the next event.
  ///
  /// Returns `Ok(Some(event))` for each entry or diagnostic, `Ok(None)`
  /// once the input is exhausted. After an error, or after `None`,
  /// every further call returns `Ok(None)`.
  ///
  /// # Errors
  ///
  /// [`DecodeError::Wire`] if reading fails or a line exceeds the
  /// configured maximum length. Any entry still open at that point is
  /// discarded.
  pub fn next_event(&mut self) -> Result<Option<DecoderEvent>, DecodeError> {
    if self.done {
      return Ok(None);
    }

    loop {
      let line = match self.lines.next_line() {
        Ok(Some(line)) => line,
        Ok(None) => {
          self.done = true;
          return Ok(self.builder.finish());
        }
        Err(e) => {
          self.done = true;
          return Err(e.into());
        }
      };

      if let Some(event) = self.builder.feed(&line) {
        if let DecoderEvent::Diagnostic(diagnostic) = &event {
          tracing::warn!(line = diagnostic.line(), "{diagnostic}");
        }
        return Ok(Some(event));
      }
    }
  }
}

impl<R: Read> LdifReader<BufReader<TranscodingReader<R>>> {
  /// Read raw bytes, transcoding from `config.encoding` to UTF-8.
  ///
  /// A byte-order mark, if present, overrides the configured encoding.
  /// Invalid byte sequences become U+FFFD.
  #[must_use]
  pub fn from_reader(reader: R, config: DecoderConfig) -> Self {
    let transcoded = TranscodingReader::new(reader, config.encoding);
    Self::with_config(BufReader::new(transcoded), config)
  }
}

impl LdifReader<BufReader<TranscodingReader<File>>> {
  /// Open an LDIF file.
  ///
  /// # Errors
  ///
  /// [`DecodeError::Open`] if the file cannot be opened.
  pub fn open(path: impl AsRef<Path>, config: DecoderConfig) -> Result<Self, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DecodeError::Open {
      path: path.to_path_buf(),
      source,
    })?;
    tracing::debug!(path = %path.display(), encoding = config.encoding.label(), "opened input");
    Ok(Self::from_reader(file, config))
  }
}

impl<R: BufRead> Iterator for LdifReader<R> {
  type Item = Result<DecoderEvent, DecodeError>;

  fn next(&mut self) -> Option<Self::Item> {
    self.next_event().transpose()
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use ldif_types::{AttrValue, SchemaMap};
  use ldif_wire::{TextEncoding, WireError};

  use super::*;

  fn collect(reader: impl Iterator<Item = Result<DecoderEvent, DecodeError>>) -> Vec<DecoderEvent> {
    reader.map(Result::unwrap).collect()
  }

  #[test]
  fn events_are_interleaved_in_order() {
    let input = "dn: cn=a\nbogus\n\ndn: cn=b\n";
    let events = collect(LdifReader::new(input.as_bytes()));
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], DecoderEvent::Diagnostic(EntryError::InvalidLine { line: 2, .. })));
    assert!(matches!(&events[1], DecoderEvent::Entry(e) if e.dn() == "cn=a"));
    assert!(matches!(&events[2], DecoderEvent::Entry(e) if e.dn() == "cn=b"));
  }

  #[test]
  fn schema_map_from_config_is_used() {
    let config = DecoderConfig::default()
      .with_schema_map([("displayName", "2.5.5.12")].into_iter().collect::<SchemaMap>());
    let input = "dn: cn=a\ndisplayName:: Wm/Dqw==\n";
    let events = collect(LdifReader::with_config(input.as_bytes(), config));
    let DecoderEvent::Entry(entry) = &events[0] else {
      panic!("expected entry, got {events:?}");
    };
    assert_eq!(entry.get("displayName"), Some(&AttrValue::from("Zoë")));
  }

  #[test]
  fn line_too_long_stops_the_stream() {
    let config = DecoderConfig::default().with_max_line_length(16);
    let input = "dn: cn=a\ndescription: far too long for the limit\n\ndn: cn=b\n";
    let mut reader = LdifReader::with_config(input.as_bytes(), config);

    let err = reader.next_event().unwrap_err();
    assert!(matches!(
      err,
      DecodeError::Wire(WireError::LineTooLong { line: 2, limit: 16 })
    ));
    assert!(reader.next_event().unwrap().is_none());
    assert!(reader.next().is_none());
  }

  #[test]
  fn from_reader_transcodes_utf16() {
    let text = "dn: cn=Zoë\ncn: Zoë\n";
    let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let config = DecoderConfig::default().with_encoding(TextEncoding::Utf16);
    let events = collect(LdifReader::from_reader(bytes.as_slice(), config));
    let DecoderEvent::Entry(entry) = &events[0] else {
      panic!("expected entry, got {events:?}");
    };
    assert_eq!(entry.dn(), "cn=Zoë");
  }

  #[test]
  fn open_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "version: 1\n\ndn: cn=a\nobjectClass: top\n\n").unwrap();
    let events = collect(LdifReader::open(file.path(), DecoderConfig::default()).unwrap());
    assert_eq!(events.len(), 1);
    let DecoderEvent::Entry(entry) = &events[0] else {
      panic!("expected entry, got {events:?}");
    };
    assert_eq!(entry.object_classes(), ["top"]);
  }

  #[test]
  fn open_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ldif");
    let Err(err) = LdifReader::open(&path, DecoderConfig::default()) else {
      panic!("opening a missing file succeeded");
    };
    assert!(matches!(&err, DecodeError::Open { path: p, .. } if p == &path));
    assert!(err.to_string().contains("missing.ldif"));
  }
}

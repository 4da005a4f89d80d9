use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ldif_types::entry::{CHANGETYPE, DN, OBJECT_CLASS};
use ldif_types::{AttrValue, Entry, TypeError};

use crate::config::WriterConfig;
use crate::error::EncodeError;
use crate::line_writer::LineWriter;

/// Streaming LDIF writer.
///
/// Entries are serialized one at a time into the owned sink:
///
/// ```text
///   [BOM]                          ← UTF-16 only
///   [# Generated <timestamp>⏎⏎]    ← if a header comment is configured
///   dn: <dn>⏎
///   [changetype: <value>⏎]
///   objectClass: <class>⏎          ← one per class, in order
///   <name>: <value>⏎               ← generic attributes, insertion order
///   <name>:: <payload>⏎            ← binary-origin values
///   ⏎
///   ... next entry
/// ```
///
/// The side indicator is never written. Nothing is written until the
/// first entry (or [`finish`](Self::finish)), so a writer that fails
/// validation on its first entry leaves the sink empty.
pub struct LdifWriter<W: Write> {
    sink: W,
    config: WriterConfig,
    lines: LineWriter,
    started: bool,
    entries_written: usize,
}

impl<W: Write> LdifWriter<W> {
    #[must_use]
    pub fn new(sink: W, config: WriterConfig) -> Self {
        Self {
            sink,
            lines: LineWriter::new(config.line_ending, config.fold_width),
            config,
            started: false,
            entries_written: 0,
        }
    }

    /// Number of entries written so far.
    #[must_use]
    pub fn entries_written(&self) -> usize {
        self.entries_written
    }

    /// Serialize one entry.
    ///
    /// The entry is fully formatted before anything reaches the sink,
    /// so a rejected entry writes nothing.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::Type`] with [`TypeError::EmptyDn`] if the DN is
    ///   blank.
    /// - [`EncodeError::LineBreakInValue`] if any value contains CR/LF.
    /// - [`EncodeError::Io`] if the sink fails.
    pub fn write_entry(&mut self, entry: &Entry) -> Result<(), EncodeError> {
        if let Err(e) = format_entry(&mut self.lines, entry) {
            self.lines.take();
            return Err(e);
        }

        self.write_preamble()?;
        let text = self.lines.take();
        self.sink.write_all(&self.config.encoding.encode(&text))?;
        self.entries_written += 1;
        tracing::debug!(dn = entry.dn(), bytes = text.len(), "entry written");
        Ok(())
    }

    /// Serialize every entry from an iterator.
    ///
    /// # Errors
    ///
    /// Stops at the first error from [`write_entry`](Self::write_entry).
    pub fn write_all<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a Entry>,
    ) -> Result<(), EncodeError> {
        for entry in entries {
            self.write_entry(entry)?;
        }
        Ok(())
    }

    /// Write the preamble if nothing was written yet, flush, and return
    /// the sink.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Io`] if writing or flushing fails.
    pub fn finish(mut self) -> Result<W, EncodeError> {
        self.write_preamble()?;
        self.sink.flush()?;
        tracing::debug!(entries = self.entries_written, "writer finished");
        Ok(self.sink)
    }

    fn write_preamble(&mut self) -> Result<(), EncodeError> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        self.sink.write_all(self.config.encoding.bom())?;
        if let Some(comment) = self.config.header.render() {
            let mut header = LineWriter::new(self.config.line_ending, None);
            header.write_comment(&comment);
            header.write_blank();
            self.sink
                .write_all(&self.config.encoding.encode(&header.finish()))?;
        }
        Ok(())
    }
}

impl LdifWriter<BufWriter<File>> {
    /// Create (or truncate) an output file.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Create`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>, config: WriterConfig) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| EncodeError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), encoding = config.encoding.label(), "created output");
        Ok(Self::new(BufWriter::new(file), config))
    }
}

/// Lay out one entry in canonical order.
fn format_entry(lines: &mut LineWriter, entry: &Entry) -> Result<(), EncodeError> {
    if entry.dn().trim().is_empty() {
        return Err(TypeError::EmptyDn.into());
    }
    lines.write_value(DN, entry.dn())?;

    if let Some(change_type) = entry.change_type() {
        lines.write_value(CHANGETYPE, change_type)?;
    }

    for class in entry.object_classes() {
        lines.write_value(OBJECT_CLASS, class)?;
    }

    for attribute in entry.attributes() {
        match &attribute.value {
            AttrValue::Binary(payloads) => {
                for payload in payloads {
                    lines.write_base64(&attribute.name, payload)?;
                }
            }
            value => {
                for text in value.values() {
                    lines.write_value(&attribute.name, text)?;
                }
            }
        }
    }

    lines.write_blank();
    Ok(())
}

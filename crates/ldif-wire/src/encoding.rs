use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8, UTF_16LE};

/// Size of the raw input chunk pulled from the wrapped reader.
const INPUT_CHUNK: usize = 8 * 1024;

/// Size of the UTF-8 staging buffer. Any non-empty buffer lets the
/// decoder make progress; this just keeps the call count low.
const OUTPUT_CHUNK: usize = 16 * 1024;

/// Character encodings an LDIF file may be stored in.
///
/// ```text
/// ┌─────────┬──────────────────────────────┬──────────────┐
/// │ Variant │ Read                         │ Write        │
/// ├─────────┼──────────────────────────────┼──────────────┤
/// │ Utf8    │ UTF-8, BOM sniffed + removed │ UTF-8, no BOM│
/// │ Utf16   │ UTF-16LE, BOM sniffed        │ UTF-16LE+BOM │
/// └─────────┴──────────────────────────────┴──────────────┘
/// ```
///
/// On read, a byte-order mark always wins over the configured
/// encoding, so a UTF-16BE file with a BOM still decodes correctly
/// when the caller asked for UTF-8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16,
}

impl TextEncoding {
    /// The `encoding_rs` codec used when reading this encoding.
    #[must_use]
    pub fn codec(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Utf16 => UTF_16LE,
        }
    }

    /// Human-readable label, also accepted by the CLI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
        }
    }

    /// Byte-order mark written at the start of an output stream.
    #[must_use]
    pub fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[],
            Self::Utf16 => &[0xFF, 0xFE],
        }
    }

    /// Encode text for output in this encoding (without a BOM).
    ///
    /// `encoding_rs` only decodes UTF-16, so the UTF-16 path goes
    /// through `str::encode_utf16` directly.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16 => text
                .encode_utf16()
                .flat_map(u16::to_le_bytes)
                .collect(),
        }
    }
}

/// Adapter that decodes any supported input encoding into a UTF-8 byte
/// stream, incrementally.
///
/// Wrapping a file in `TranscodingReader` (and then a `BufReader`) lets
/// the line reader work purely on UTF-8 without buffering the whole
/// file. Malformed input sequences become U+FFFD rather than errors.
///
/// ```text
///   File ──▶ TranscodingReader (UTF-16 → UTF-8) ──▶ BufReader ──▶ LineReader
/// ```
pub struct TranscodingReader<R> {
    inner: R,
    decoder: Decoder,
    input: Box<[u8]>,
    in_start: usize,
    in_end: usize,
    output: Box<[u8]>,
    out_start: usize,
    out_end: usize,
    input_eof: bool,
    finished: bool,
}

impl<R: Read> TranscodingReader<R> {
    /// Wrap `inner`, decoding it as `encoding` unless a BOM says otherwise.
    #[must_use]
    pub fn new(inner: R, encoding: TextEncoding) -> Self {
        Self {
            inner,
            decoder: encoding.codec().new_decoder(),
            input: vec![0u8; INPUT_CHUNK].into_boxed_slice(),
            in_start: 0,
            in_end: 0,
            output: vec![0u8; OUTPUT_CHUNK].into_boxed_slice(),
            out_start: 0,
            out_end: 0,
            input_eof: false,
            finished: false,
        }
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn refill_input(&mut self) -> io::Result<()> {
        loop {
            match self.inner.read(&mut self.input) {
                Ok(n) => {
                    self.in_start = 0;
                    self.in_end = n;
                    self.input_eof = n == 0;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Run the decoder once, staging fresh UTF-8 bytes in `output`.
    fn decode_chunk(&mut self) -> io::Result<()> {
        if self.in_start == self.in_end && !self.input_eof {
            self.refill_input()?;
        }

        let last = self.input_eof;
        let (result, read, written, _replaced) = self.decoder.decode_to_utf8(
            &self.input[self.in_start..self.in_end],
            &mut self.output,
            last,
        );
        self.in_start += read;
        self.out_start = 0;
        self.out_end = written;

        if last && result == CoderResult::InputEmpty {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for TranscodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_start < self.out_end {
                let n = buf.len().min(self.out_end - self.out_start);
                buf[..n].copy_from_slice(&self.output[self.out_start..self.out_start + n]);
                self.out_start += n;
                return Ok(n);
            }
            if self.finished {
                return Ok(0);
            }
            self.decode_chunk()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcode(bytes: &[u8], encoding: TextEncoding) -> String {
        let mut reader = TranscodingReader::new(bytes, encoding);
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn utf8_passes_through() {
        assert_eq!(transcode("dn: cn=Zoë\n".as_bytes(), TextEncoding::Utf8), "dn: cn=Zoë\n");
    }

    #[test]
    fn utf8_bom_is_removed() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"dn: cn=x\n");
        assert_eq!(transcode(&bytes, TextEncoding::Utf8), "dn: cn=x\n");
    }

    #[test]
    fn utf16_round_trips_through_encode() {
        let text = "dn: cn=Łukasz\ncn: Łukasz\n";
        let mut bytes = TextEncoding::Utf16.bom().to_vec();
        bytes.extend(TextEncoding::Utf16.encode(text));
        assert_eq!(transcode(&bytes, TextEncoding::Utf16), text);
    }

    #[test]
    fn utf16_without_bom_uses_configured_encoding() {
        let bytes = TextEncoding::Utf16.encode("cn: a\n");
        assert_eq!(transcode(&bytes, TextEncoding::Utf16), "cn: a\n");
    }

    #[test]
    fn bom_overrides_configured_encoding() {
        let mut bytes = TextEncoding::Utf16.bom().to_vec();
        bytes.extend(TextEncoding::Utf16.encode("cn: a\n"));
        assert_eq!(transcode(&bytes, TextEncoding::Utf8), "cn: a\n");
    }

    #[test]
    fn malformed_utf8_becomes_replacement_character() {
        assert_eq!(transcode(b"cn: \xFFx\n", TextEncoding::Utf8), "cn: \u{FFFD}x\n");
    }

    #[test]
    fn large_input_spans_many_chunks() {
        let line = "description: ".to_string() + &"é".repeat(100) + "\n";
        let text = line.repeat(500);
        let bytes = TextEncoding::Utf16.encode(&text);
        assert_eq!(transcode(&bytes, TextEncoding::Utf16), text);
    }

    #[test]
    fn utf8_output_has_no_bom() {
        assert!(TextEncoding::Utf8.bom().is_empty());
        assert_eq!(TextEncoding::Utf8.encode("a"), b"a");
    }
}

#![warn(clippy::pedantic)]

pub mod encoding;
pub mod error;
pub mod grammar;
pub mod line_reader;

pub use encoding::{TextEncoding, TranscodingReader};
pub use error::WireError;
pub use grammar::{AttrLine, ParsedLine, ValueNotation};
pub use line_reader::{LineReader, LogicalLine};

#![warn(clippy::pedantic)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod line_writer;
pub mod writer;

pub use config::{HeaderComment, LineEnding, WriterConfig};
pub use encoder::LdifEncoder;
pub use error::EncodeError;
pub use line_writer::LineWriter;
pub use writer::LdifWriter;

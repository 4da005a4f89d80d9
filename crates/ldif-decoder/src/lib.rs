#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod entry_builder;
pub mod error;
pub mod streaming;
pub mod value_decoder;

pub use config::DecoderConfig;
pub use decoder::{DecodedLdif, LdifDecoder};
pub use entry_builder::EntryBuilder;
pub use error::{DecodeError, EntryError};
pub use streaming::{DecoderEvent, LdifReader};

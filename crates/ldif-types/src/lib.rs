#![warn(clippy::pedantic)]

pub mod change_type;
pub mod dn;
pub mod entry;
pub mod error;
pub mod schema_map;
pub mod value;

pub use change_type::ChangeType;
pub use entry::{Attribute, Entry, EntryFlags};
pub use error::TypeError;
pub use schema_map::SchemaMap;
pub use value::AttrValue;

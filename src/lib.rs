//! An ordered, attributed XML element tree: build it, write it out, read it back, walk it,
//! query it with a small path language and change it in place.
//!
//! Comments can be added to a tree and are serialized, but the parser drops them.

pub mod attributes;
pub mod error;
pub mod node;
pub mod parse;
pub mod path;
pub mod serialize;
pub mod token;
pub mod tokenize;
pub mod walk;
pub mod wasm;

mod chariter;
mod textrange;
mod tokenstream;
mod util;
mod xmlchar;

pub use attributes::Attributes;
pub use error::{ErrorPos, Result, SyntaxError, XmlError};
pub use node::{Element, XmlNode};
pub use parse::{parse, parse_file, read_from, XmlParser};
pub use path::PathQuery;
pub use serialize::{pretty_print, serialize, serialize_with_options, write_file, write_to, SerializeOptions};
pub use walk::Walk;

//! Encoder and decoder for TOON (Token-Oriented Object Notation), a
//! compact indentation-based text format.
//!
//! TOON represents the usual JSON data model — null, booleans, numbers,
//! strings, arrays, and ordered objects — with indentation instead of
//! braces and, where it pays off, a tabular layout: an array of uniform
//! flat objects collapses to one header line of column keys plus one
//! comma-joined row per element, so repeated field names are written
//! once instead of per element.
//!
//! ```text
//! users:
//!   id,name,role
//!   1,Alice,admin
//!   2,Bob,user
//! ```
//!
//! Encoding and decoding are inverse: `decode(encode(v)) == v` for every
//! encodable value, with integers kept exact at any width and floats
//! rendered with the fewest decimal digits that parse back to the
//! identical value.
//!
//! # Examples
//!
//! ```rust
//! use toon_core::{decode, encode, toon};
//!
//! let value = toon!({
//!     "users" => [
//!         {"id" => 1, "name" => "Alice", "role" => "admin"},
//!         {"id" => 2, "name" => "Bob", "role" => "user"},
//!     ],
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "users:\n  id,name,role\n  1,Alice,admin\n  2,Bob,user");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! Output is configurable through [`EncodeOptions`]:
//!
//! ```rust
//! use toon_core::{encode_with_options, toon, EncodeOptions};
//!
//! let value = toon!({"tags" => ["a", "b"]});
//! let options = EncodeOptions::new().with_inline_arrays(true);
//! assert_eq!(encode_with_options(&value, &options).unwrap(), "tags: [a,b]");
//! ```
//!
//! The format itself is described in [`format`].

mod decode;
mod encode;
mod error;
pub mod format;
#[macro_use]
mod macros;
mod map;
mod options;
mod scalar;
mod tabular;
mod value;

pub use decode::decode;
pub use encode::{encode, encode_with_options};
pub use error::{DecodeError, EncodeError};
pub use map::Map;
pub use options::{EncodeOptions, KeySeparator};
pub use value::{Number, Value};

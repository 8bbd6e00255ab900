//! An in-place NBT reader: one linear pass swaps every numeric field to
//! host order and records a lazily-navigable index, so the rest of a
//! document's values are read with no further allocation or parsing.
//!
//! The entry points are [`read_in_place`] (reuse the caller's buffer) and
//! [`read_owned`] (copy it first, for callers that don't control the
//! buffer's lifetime). Both are generic over the wire endianness (any
//! `byteorder::ByteOrder`) and take a `BOUND_CHECK` const generic: `true`
//! checks every structural read against the source length up front,
//! `false` trusts the input and lets a malformed document panic via
//! ordinary slice indexing instead.
//!
//! ```
//! use nbtarena::{read_owned, Tag};
//! use byteorder::BigEndian;
//!
//! let bytes = [3u8, 0, 3, b'a', b'g', b'e', 0, 0, 0, 30]; // TAG_Int "age" = 30
//! let doc = read_owned::<BigEndian, true>(&bytes).unwrap();
//! assert_eq!(doc.root_type(), Tag::Int);
//! assert_eq!(doc.root_value().unwrap().as_int().unwrap(), 30);
//! ```

#[cfg(feature = "arbitrary1")]
pub mod arbitrary_support;
mod arrays;
mod compound;
mod document;
pub mod error;
mod list;
mod mark;
mod nav;
mod parser;
mod swap;
mod tag;
mod value;

#[cfg(test)]
mod test_support;

pub use arrays::{ByteArray, IntArray, LongArray};
pub use compound::{Compound, CompoundIter};
pub use document::Document;
pub use error::{ParseError, ParseErrorKind, TypeError};
pub use list::{List, ListIter};
pub use parser::{read_in_place, read_in_place_with, read_owned, read_owned_with};
pub use swap::{DefaultSwapper, MaybeNative, Swapper};
pub use tag::Tag;
pub use value::AnyTag;

//! BSON archives.
//!
//! [`BsonWriter`] turns the node/name/value calls of a [`Save`] impl into
//! BSON documents, one per top level node. [`BsonReader`] goes the other
//! way: it splits a byte stream into documents and answers the calls of a
//! [`Load`] impl against them.
//!
//! Values map onto BSON like this:
//!
//! - a node becomes an embedded document, or an array after
//!   [`make_array`](crate::ser::OutputArchive::make_array)
//! - named fields use their name as key, unnamed fields of a document are
//!   keyed `value0`, `value1`, ...
//! - a top level node is a whole document, it never has a key
//!
//! ```rust
//! use bsonarch::bson;
//!
//! fn main() -> bsonarch::Result<()> {
//!     let pairs = vec![(1, "one".to_string()), (2, "two".to_string())];
//!     let bytes = bson::to_vec(&(pairs.clone(), true))?;
//!
//!     let back: (Vec<(i32, String)>, bool) = bson::from_slice(&bytes)?;
//!     assert_eq!(back, (pairs, true));
//!     Ok(())
//! }
//! ```
//!
//! [`Save`]: crate::ser::Save
//! [`Load`]: crate::de::Load

mod builder;
pub mod framing;
pub mod json;
mod reader;
mod view;
mod writer;

pub use self::reader::BsonReader;
pub use self::writer::BsonWriter;
pub use ::bson::spec::ElementType;

use crate::de::Load;
use crate::error::Result;
use crate::ser::Save;

/// Writes `value` as a single record.
///
/// `value` must save itself as a node, scalars and sequences can't be
/// records on their own.
pub fn to_vec<T: ?Sized + Save>(value: &T) -> Result<Vec<u8>> {
    let mut writer = BsonWriter::new(Vec::with_capacity(128));
    value.save(&mut writer)?;
    Ok(writer.into_inner())
}

/// Reads a `T` from the first record in `bytes`.
pub fn from_slice<T: Load>(bytes: &[u8]) -> Result<T> {
    let mut reader = BsonReader::from_slice(bytes)?;
    T::load(&mut reader)
}

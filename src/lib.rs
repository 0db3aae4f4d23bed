//! Saves and loads values as streams of BSON documents.
//!
//! Values describe themselves as a tree of nodes, named values and sized
//! sequences through the [`Save`] and [`Load`] traits. The BSON archives in
//! [`bson`] map that tree onto documents and arrays, writing one document per
//! top level value.
//!
//! # Struct
//!
//! ```rust
//! use bsonarch::{bson, Load, Save};
//!
//! #[derive(Save, Load, Debug, PartialEq)]
//! struct Example {
//!     code: u32,
//!     #[bsonarch(rename = "msg")]
//!     message: String,
//!     #[bsonarch(skip)]
//!     cache: Vec<u8>,
//!     #[bsonarch(default)]
//!     retries: i32,
//! }
//!
//! fn main() -> bsonarch::Result<()> {
//!     let example = Example {
//!         code: 200,
//!         message: "ok".to_string(),
//!         cache: vec![1, 2, 3],
//!         retries: 0,
//!     };
//!
//!     let bytes = bson::to_vec(&example)?;
//!     let out: Example = bson::from_slice(&bytes)?;
//!     assert_eq!(out.message, example.message);
//!     assert!(out.cache.is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Enum
//!
//! Enums with unit variants only are saved as the variant name.
//!
//! ```rust
//! use bsonarch::{Load, Save};
//!
//! #[derive(Debug, PartialEq, Save, Load)]
//! enum Level {
//!     Low,
//!     #[bsonarch(rename = "mid")]
//!     Medium,
//!     High,
//! }
//! ```
//!
//! # Streams
//!
//! Every top level value written to a [`BsonWriter`](bson::BsonWriter) is
//! a separate document, a [`BsonReader`](bson::BsonReader) hands them back
//! in the same order.
//!
//! ```rust
//! use bsonarch::bson::{BsonReader, BsonWriter};
//!
//! fn main() -> bsonarch::Result<()> {
//!     let mut writer = BsonWriter::new(vec![]);
//!     for x in 0..3 {
//!         bsonarch::Save::save(&(x, x * 2), &mut writer)?;
//!     }
//!
//!     let mut reader = BsonReader::from_slice(&writer.into_inner())?;
//!     assert_eq!(reader.len(), 3);
//!     for x in 0..3 {
//!         let pair: (i32, i32) = bsonarch::Load::load(&mut reader)?;
//!         assert_eq!(pair, (x, x * 2));
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/bsonarch/0.1.0")]
#![allow(clippy::needless_doctest_main)]

#[cfg(feature = "derive")]
#[doc(hidden)]
pub use bsonarch_internal::*;

// Not public API.
#[doc(hidden)]
pub mod export;

mod error;

pub mod bson;
pub mod bytes;
pub mod de;
pub mod ser;
pub mod tags;

#[doc(inline)]
pub use crate::de::{InputArchive, Load};
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::ser::{OutputArchive, Save};

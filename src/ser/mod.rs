//! Saving traits.
//!
//! A [`Save`] impl walks a value and describes it to an [`OutputArchive`]
//! as a tree: nodes for composite values, scalars at the leaves, and names
//! for the fields that have one.
//!
//! ## Saving a primitive
//!
//! Scalars are written straight into the enclosing node, whatever name was
//! set before becomes their key.
//!
//! ```rust
//! use bsonarch::ser::{OutputArchive, Save};
//!
//! struct Celsius(f64);
//!
//! impl Save for Celsius {
//!     fn save(&self, ar: &mut dyn OutputArchive) -> bsonarch::Result<()> {
//!         ar.double(self.0)
//!     }
//! }
//! ```
//!
//! ## Saving a sequence
//!
//! A sequence is a node tagged with its size, its elements take no names.
//!
//! ```rust
//! use bsonarch::ser::{OutputArchive, Save};
//! use bsonarch::tags::SizeTag;
//!
//! struct Stack<T>(Vec<T>);
//!
//! impl<T: Save> Save for Stack<T> {
//!     fn save(&self, ar: &mut dyn OutputArchive) -> bsonarch::Result<()> {
//!         ar.start_node()?;
//!         ar.save(&SizeTag(self.0.len()))?;
//!         for e in self.0.iter().rev() {
//!             ar.save(e)?;
//!         }
//!         ar.finish_node()
//!     }
//! }
//! ```
//!
//! ## Saving a struct
//!
//! This is what `#[derive(Save)]` generates.
//!
//! ```rust
//! use bsonarch::ser::{OutputArchive, Save};
//!
//! struct Demo {
//!     code: u32,
//!     message: String,
//! }
//!
//! impl Save for Demo {
//!     fn save(&self, ar: &mut dyn OutputArchive) -> bsonarch::Result<()> {
//!         ar.start_node()?;
//!         ar.nvp("code", &self.code)?;
//!         ar.nvp("message", &self.message)?;
//!         ar.finish_node()
//!     }
//! }
//! ```

mod impls;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Types that can describe themselves to an [`OutputArchive`].
///
/// [Refer to the module documentation for examples.][crate::ser]
pub trait Save {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()>;
}

/// Sink of a saving walk.
///
/// Every value is written into the innermost open node. A name set with
/// [`set_next_name`](OutputArchive::set_next_name) applies to the next value
/// or node only.
pub trait OutputArchive {
    /// Names the next value or node, replacing any name not used yet.
    fn set_next_name(&mut self, name: &str);

    fn start_node(&mut self) -> Result<()>;

    fn finish_node(&mut self) -> Result<()>;

    /// Turns the node just started into a sequence. Must come before anything
    /// is written inside it.
    fn make_array(&mut self) -> Result<()>;

    fn boolean(&mut self, b: bool) -> Result<()>;

    fn int(&mut self, n: i32) -> Result<()>;

    fn long(&mut self, n: i64) -> Result<()>;

    fn double(&mut self, n: f64) -> Result<()>;

    fn string(&mut self, s: &str) -> Result<()>;

    fn datetime(&mut self, t: DateTime<Utc>) -> Result<()>;

    fn binary(&mut self, b: &[u8]) -> Result<()>;
}

impl<'a> dyn OutputArchive + 'a {
    #[inline]
    pub fn save<T: ?Sized + Save>(&mut self, value: &T) -> Result<()> {
        value.save(self)
    }

    /// Saves `value` under `name`.
    #[inline]
    pub fn nvp<T: ?Sized + Save>(&mut self, name: &str, value: &T) -> Result<()> {
        self.set_next_name(name);
        value.save(self)
    }
}

//! Loading traits.
//!
//! [`Load`] is the mirror image of [`Save`](crate::ser::Save): the impl
//! makes the same calls in the same order, reading values instead of
//! writing them.
//!
//! ```rust
//! use bsonarch::de::{InputArchive, Load};
//! use bsonarch::tags::SizeTag;
//!
//! struct Demo {
//!     code: u32,
//!     tags: Vec<String>,
//! }
//!
//! impl Load for Demo {
//!     fn load(ar: &mut dyn InputArchive) -> bsonarch::Result<Self> {
//!         ar.start_node()?;
//!         let code = ar.nvp("code")?;
//!         let tags = ar.nvp("tags")?;
//!         ar.finish_node()?;
//!         Ok(Demo { code, tags })
//!     }
//! }
//!
//! // A sequence pulls its size before the elements
//! struct Ids(Vec<i64>);
//!
//! impl Load for Ids {
//!     fn load(ar: &mut dyn InputArchive) -> bsonarch::Result<Self> {
//!         ar.start_node()?;
//!         let SizeTag(len) = ar.load()?;
//!         let mut ids = Vec::with_capacity(len);
//!         for _ in 0..len {
//!             ids.push(ar.long()?);
//!         }
//!         ar.finish_node()?;
//!         Ok(Ids(ids))
//!     }
//! }
//! ```

mod impls;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// Types that can rebuild themselves from an [`InputArchive`].
pub trait Load: Sized {
    fn load(ar: &mut dyn InputArchive) -> Result<Self>;
}

/// Source of a loading walk.
///
/// Named values are looked up by name inside the current node, so they may
/// come in any order. Unnamed ones are taken in the order they were written.
pub trait InputArchive {
    /// Names the next value or node, replacing any name not used yet.
    fn set_next_name(&mut self, name: &str);

    fn start_node(&mut self) -> Result<()>;

    fn finish_node(&mut self) -> Result<()>;

    /// Element count of the current node, which must be a sequence.
    fn load_size(&mut self) -> Result<usize>;

    /// Whether the current node has a value called `name`. Always false
    /// inside sequences.
    fn contains(&mut self, name: &str) -> Result<bool>;

    fn boolean(&mut self) -> Result<bool>;

    fn int(&mut self) -> Result<i32>;

    /// Also accepts values written with [`int`](InputArchive::int).
    fn long(&mut self) -> Result<i64>;

    fn double(&mut self) -> Result<f64>;

    fn string(&mut self) -> Result<String>;

    fn datetime(&mut self) -> Result<DateTime<Utc>>;

    fn binary(&mut self) -> Result<Vec<u8>>;
}

impl<'a> dyn InputArchive + 'a {
    #[inline]
    pub fn load<T: Load>(&mut self) -> Result<T> {
        T::load(self)
    }

    /// Loads the value called `name`.
    #[inline]
    pub fn nvp<T: Load>(&mut self, name: &str) -> Result<T> {
        self.set_next_name(name);
        T::load(self)
    }

    /// Like [`nvp`](#method.nvp) but falls back to `default` when there's no
    /// value called `name`.
    pub fn nvp_or_else<T, F>(&mut self, name: &str, default: F) -> Result<T>
    where
        T: Load,
        F: FnOnce() -> T,
    {
        if self.contains(name)? {
            self.nvp(name)
        } else {
            Ok(default())
        }
    }
}

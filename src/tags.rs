//! Wrappers that annotate values for the archives.

use crate::de::{InputArchive, Load};
use crate::error::Result;
use crate::ser::{OutputArchive, Save};

/// A value saved under an explicit name.
///
/// Doesn't open a node of its own, the name goes to whatever `value` writes
/// first.
#[derive(Debug, Clone, Copy)]
pub struct NameValuePair<'a, T: ?Sized> {
    pub name: &'a str,
    pub value: &'a T,
}

pub fn make_nvp<'a, T: ?Sized>(name: &'a str, value: &'a T) -> NameValuePair<'a, T> {
    NameValuePair { name, value }
}

impl<'a, T: ?Sized + Save> Save for NameValuePair<'a, T> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.nvp(self.name, self.value)
    }
}

/// Marks the enclosing node as a sequence and carries its length.
///
/// On save it only turns the node into an array, the element count is
/// implied by the elements that follow. On load it reads the count back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeTag(pub usize);

impl Save for SizeTag {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.make_array()
    }
}

impl Load for SizeTag {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.load_size().map(SizeTag)
    }
}

/// One entry of a map, saved as a node with a `key` and a `value` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapItem<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: Save, V: Save> Save for MapItem<K, V> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.start_node()?;
        ar.nvp("key", &self.key)?;
        ar.nvp("value", &self.value)?;
        ar.finish_node()
    }
}

impl<K: Load, V: Load> Load for MapItem<K, V> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.start_node()?;
        let key = ar.nvp("key")?;
        let value = ar.nvp("value")?;
        ar.finish_node()?;
        Ok(MapItem { key, value })
    }
}

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::de::{InputArchive, Load};
use crate::error::Result;
use crate::ser::{OutputArchive, Save};

/// Byte buffer saved as a single binary value.
///
/// A plain `Vec<u8>` is a sequence of small integers, wrap it in `Bytes` to
/// get one binary field instead.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Bytes(Vec::new())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bytes({})", bintext::hex::encode(&self.0))
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl Save for Bytes {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.binary(&self.0)
    }
}

impl Load for Bytes {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.binary().map(Bytes)
    }
}

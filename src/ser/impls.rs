use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::convert::TryFrom;
use std::hash::BuildHasher;

use crate::error::{Error, Result};
use crate::ser::{OutputArchive, Save};
use crate::tags::{MapItem, SizeTag};

impl Save for bool {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.boolean(*self)
    }
}

impl Save for str {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.string(self)
    }
}

impl Save for String {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.string(self)
    }
}

macro_rules! int {
    ($($ty:ident)*) => {
        $(
            impl Save for $ty {
                fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
                    ar.int(*self as i32)
                }
            }
        )*
    };
}
int!(i8 i16 i32 u8 u16);

macro_rules! long {
    ($($ty:ident)*) => {
        $(
            impl Save for $ty {
                fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
                    let n = i64::try_from(*self).map_err(|_| Error::OutOfRange(stringify!($ty)))?;
                    ar.long(n)
                }
            }
        )*
    };
}
long!(i64 u32 u64 isize usize);

impl Save for f32 {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.double(*self as f64)
    }
}

impl Save for f64 {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.double(*self)
    }
}

impl Save for DateTime<Utc> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        ar.datetime(*self)
    }
}

impl<'a, T: ?Sized + Save> Save for &'a T {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        (**self).save(ar)
    }
}

impl<T: ?Sized + Save> Save for Box<T> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        (**self).save(ar)
    }
}

/// Zero or one element
impl<T: Save> Save for Option<T> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        sequence(ar, self.iter().len(), self.iter())
    }
}

impl<T: Save> Save for [T] {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        sequence(ar, self.len(), self.iter())
    }
}

impl<T: Save> Save for Vec<T> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        sequence(ar, self.len(), self.iter())
    }
}

impl<T: Save> Save for VecDeque<T> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        sequence(ar, self.len(), self.iter())
    }
}

impl<K: Save, V: Save> Save for BTreeMap<K, V> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        let items = self.iter().map(|(key, value)| MapItem { key, value });
        sequence(ar, self.len(), items)
    }
}

impl<K: Save, V: Save, H: BuildHasher> Save for HashMap<K, V, H> {
    fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
        let items = self.iter().map(|(key, value)| MapItem { key, value });
        sequence(ar, self.len(), items)
    }
}

macro_rules! tuple {
    ($($name:ident . $n:tt)+) => {
        impl<$($name: Save),+> Save for ($($name,)+) {
            fn save(&self, ar: &mut dyn OutputArchive) -> Result<()> {
                ar.start_node()?;
                $(self.$n.save(ar)?;)+
                ar.finish_node()
            }
        }
    };
}
tuple!(A.0);
tuple!(A.0 B.1);
tuple!(A.0 B.1 C.2);
tuple!(A.0 B.1 C.2 D.3);

fn sequence<T, I>(ar: &mut dyn OutputArchive, len: usize, items: I) -> Result<()>
where
    T: Save,
    I: Iterator<Item = T>,
{
    ar.start_node()?;
    SizeTag(len).save(ar)?;
    for item in items {
        item.save(ar)?;
    }
    ar.finish_node()
}

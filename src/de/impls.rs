use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::convert::TryFrom;
use std::hash::{BuildHasher, Hash};

use crate::de::{InputArchive, Load};
use crate::error::{Error, Result};
use crate::tags::{MapItem, SizeTag};

impl Load for bool {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.boolean()
    }
}

impl Load for String {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.string()
    }
}

impl Load for i32 {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.int()
    }
}

impl Load for i64 {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.long()
    }
}

macro_rules! narrow {
    ($read:ident => $($ty:ident)*) => {
        $(
            impl Load for $ty {
                fn load(ar: &mut dyn InputArchive) -> Result<Self> {
                    let n = ar.$read()?;
                    $ty::try_from(n).map_err(|_| Error::OutOfRange(stringify!($ty)))
                }
            }
        )*
    };
}
narrow!(int => i8 i16 u8 u16);
narrow!(long => u32 u64 isize usize);

impl Load for f32 {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.double().map(|n| n as f32)
    }
}

impl Load for f64 {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.double()
    }
}

impl Load for DateTime<Utc> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.datetime()
    }
}

impl<T: Load> Load for Box<T> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        T::load(ar).map(Box::new)
    }
}

impl<T: Load> Load for Option<T> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        ar.start_node()?;
        let SizeTag(len) = SizeTag::load(ar)?;
        let value = match len {
            0 => None,
            1 => Some(T::load(ar)?),
            _ => return Err(Error::Malformed("optional value with more than one element")),
        };
        ar.finish_node()?;
        Ok(value)
    }
}

impl<T: Load> Load for Vec<T> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        sequence(ar, Vec::with_capacity, Vec::push)
    }
}

impl<T: Load> Load for VecDeque<T> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        sequence(ar, VecDeque::with_capacity, VecDeque::push_back)
    }
}

impl<K: Load + Ord, V: Load> Load for BTreeMap<K, V> {
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        sequence(ar, |_| BTreeMap::new(), |map, item: MapItem<K, V>| {
            map.insert(item.key, item.value);
        })
    }
}

impl<K, V, H> Load for HashMap<K, V, H>
where
    K: Load + Hash + Eq,
    V: Load,
    H: BuildHasher + Default,
{
    fn load(ar: &mut dyn InputArchive) -> Result<Self> {
        sequence(
            ar,
            |len| HashMap::with_capacity_and_hasher(len, H::default()),
            |map, item: MapItem<K, V>| {
                map.insert(item.key, item.value);
            },
        )
    }
}

macro_rules! tuple {
    ($($name:ident)+) => {
        impl<$($name: Load),+> Load for ($($name,)+) {
            fn load(ar: &mut dyn InputArchive) -> Result<Self> {
                ar.start_node()?;
                let value = ($($name::load(ar)?,)+);
                ar.finish_node()?;
                Ok(value)
            }
        }
    };
}
tuple!(A);
tuple!(A B);
tuple!(A B C);
tuple!(A B C D);

fn sequence<T, C, N, P>(ar: &mut dyn InputArchive, new: N, mut push: P) -> Result<C>
where
    T: Load,
    N: FnOnce(usize) -> C,
    P: FnMut(&mut C, T),
{
    ar.start_node()?;
    let SizeTag(len) = SizeTag::load(ar)?;
    let mut out = new(len);
    for _ in 0..len {
        push(&mut out, T::load(ar)?);
    }
    ar.finish_node()?;
    Ok(out)
}

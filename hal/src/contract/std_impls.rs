//! Contracts for standard library and ecosystem types
//!
//! Mirrors how `serde_json` writes these types: primitives are scalars, wrappers
//! serialize as their contents, sequences as arrays and maps as objects keyed by the
//! rendered key.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use super::{Contract, HalContract, Resource};

macro_rules! scalar_contract {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HalContract for $ty {
                fn contract(&self) -> Contract<'_> {
                    Contract::Scalar
                }
            }
        )*
    };
}

scalar_contract!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    serde_json::Value,
    uuid::Uuid,
);

impl<T: Resource> HalContract for Option<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::Transparent(self.as_ref().map(|value| value as &dyn Resource))
    }
}

impl<T: Resource> HalContract for Box<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::Transparent(Some(&**self as &dyn Resource))
    }
}

impl<T: Resource> HalContract for Rc<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::Transparent(Some(&**self as &dyn Resource))
    }
}

impl<T: Resource> HalContract for Arc<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::Transparent(Some(&**self as &dyn Resource))
    }
}

impl<T: Resource> HalContract for Vec<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::array(self)
    }
}

impl<T: Resource> HalContract for VecDeque<T> {
    fn contract(&self) -> Contract<'_> {
        Contract::array(self)
    }
}

impl<T: Resource, const N: usize> HalContract for [T; N] {
    fn contract(&self) -> Contract<'_> {
        Contract::array(self)
    }
}

impl<K, V, S> HalContract for HashMap<K, V, S>
where
    K: Display,
    V: Resource,
    S: BuildHasher,
{
    fn contract(&self) -> Contract<'_> {
        Contract::Dictionary(
            self.iter()
                .map(|(key, value)| (key.to_string(), value as &dyn Resource))
                .collect(),
        )
    }
}

impl<K, V> HalContract for BTreeMap<K, V>
where
    K: Display,
    V: Resource,
{
    fn contract(&self) -> Contract<'_> {
        Contract::Dictionary(
            self.iter()
                .map(|(key, value)| (key.to_string(), value as &dyn Resource))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::contract::{ShapeKind, elements, resolve};

    #[test]
    fn test_std_shapes() {
        let count = 3_u32;
        let list = vec![1_u32, 2, 3];
        let map = BTreeMap::from([("gear".to_string(), 1_u32)]);
        let missing: Option<u32> = None;

        assert_eq!(Resource::contract(&count).kind(), ShapeKind::Scalar);
        assert_eq!(Resource::contract(&list).kind(), ShapeKind::Array);
        assert_eq!(Resource::contract(&map).kind(), ShapeKind::Dictionary);
        assert_eq!(Resource::contract(&missing).kind(), ShapeKind::Transparent);
    }

    #[test]
    fn test_resolve_looks_through_wrappers() {
        let nested: Option<Box<Vec<u32>>> = Some(Box::new(vec![7, 8]));
        let empty: Option<Vec<u32>> = None;

        let resolved = resolve(&nested).map(|value| value.contract().kind());
        assert_eq!(resolved, Some(ShapeKind::Array));
        assert!(resolve(&empty).is_none());
        assert_eq!(elements(&nested).map(|items| items.len()), Some(2));
    }
}

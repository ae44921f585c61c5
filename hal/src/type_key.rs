//! Identity of a native type as seen by the repository
//!
//! Registrations match on exact types only, so the key is the `TypeId`. The type name
//! is carried alongside for logs and error messages.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Exact-type identity used as the repository key
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id:   TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id:   TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name, e.g. `my_api::widgets::Widget`
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths
    /// For example: `my_api::widgets::Widget` returns `Widget`,
    /// `alloc::vec::Vec<my_api::widgets::Widget>` returns `Vec<Widget>`
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for ch in self.name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                segment.push(ch);
            } else {
                short.push_str(segment.rsplit("::").next().unwrap_or(&segment));
                segment.clear();
                short.push(ch);
            }
        }
        short.push_str(segment.rsplit("::").next().unwrap_or(&segment));
        short
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

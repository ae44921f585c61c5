//! Shape classification of native values
//!
//! The walker never inspects native types itself. Every type that takes part in a
//! transformation describes itself through [`HalContract`], which answers the one
//! question the walker needs at each node: is this value object-like, array-like,
//! dictionary-like, a transparent wrapper, or a scalar, and what are its children.

mod resource;
mod std_impls;

use std::borrow::Cow;

pub use resource::{HalContract, Resource};
use strum::{AsRefStr, Display};

/// Structural shape of a native value, borrowed from the value itself
pub enum Contract<'a> {
    /// Object-like: declared members in serializer order
    Object(Vec<Member<'a>>),
    /// Array-like: elements in order
    Array(Vec<&'a dyn Resource>),
    /// Dictionary-like: native key rendered as a string, paired with the entry value
    Dictionary(Vec<(String, &'a dyn Resource)>),
    /// Serializes as the wrapped value, or as JSON null when there is none
    Transparent(Option<&'a dyn Resource>),
    /// Leaf value, never transformed
    Scalar,
}

impl<'a> Contract<'a> {
    /// Array contract over a sequence of elements
    pub fn array<E, I>(elements: I) -> Self
    where
        E: Resource,
        I: IntoIterator<Item = &'a E>,
    {
        Self::Array(
            elements
                .into_iter()
                .map(|element| element as &dyn Resource)
                .collect(),
        )
    }

    /// Shape tag of this contract
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Object(_) => ShapeKind::Object,
            Self::Array(_) => ShapeKind::Array,
            Self::Dictionary(_) => ShapeKind::Dictionary,
            Self::Transparent(_) => ShapeKind::Transparent,
            Self::Scalar => ShapeKind::Scalar,
        }
    }
}

/// Tag of a [`Contract`], used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    /// See [`Contract::Object`]
    Object,
    /// See [`Contract::Array`]
    Array,
    /// See [`Contract::Dictionary`]
    Dictionary,
    /// See [`Contract::Transparent`]
    Transparent,
    /// See [`Contract::Scalar`]
    Scalar,
}

/// One declared member of an object-like value
pub struct Member<'a> {
    name:            &'static str,
    serialized_name: Cow<'static, str>,
    value:           &'a dyn Resource,
}

impl<'a> Member<'a> {
    /// Member serialized under its native name
    pub fn new<V: Resource>(name: &'static str, value: &'a V) -> Self {
        Self {
            name,
            serialized_name: Cow::Borrowed(name),
            value,
        }
    }

    /// Member serialized under a different name than its native one
    pub fn renamed<V: Resource>(
        name: &'static str,
        serialized_name: impl Into<Cow<'static, str>>,
        value: &'a V,
    ) -> Self {
        Self {
            name,
            serialized_name: serialized_name.into(),
            value,
        }
    }

    /// Native member name, as used by selectors
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the member in the serialized JSON object
    pub fn serialized_name(&self) -> &str {
        &self.serialized_name
    }

    /// The member value
    pub fn value(&self) -> &'a dyn Resource {
        self.value
    }
}

/// Unwrap transparent wrappers until a value with its own shape is reached
///
/// Returns `None` when a wrapper holds nothing, i.e. the value serializes as null.
pub fn resolve(resource: &dyn Resource) -> Option<&dyn Resource> {
    match resource.contract() {
        Contract::Transparent(inner) => inner.and_then(resolve),
        Contract::Object(_) | Contract::Array(_) | Contract::Dictionary(_) | Contract::Scalar => {
            Some(resource)
        }
    }
}

/// Elements of an array-like value, looking through transparent wrappers
pub fn elements(resource: &dyn Resource) -> Option<Vec<&dyn Resource>> {
    match resolve(resource)?.contract() {
        Contract::Array(elements) => Some(elements),
        Contract::Object(_)
        | Contract::Dictionary(_)
        | Contract::Transparent(_)
        | Contract::Scalar => None,
    }
}

/// Value of the member with the given native name
///
/// Looks at the object-shaped view of the value first, then at dictionary entries
/// keyed by the same name.
pub fn member_value<'a>(resource: &'a dyn Resource, name: &str) -> Option<&'a dyn Resource> {
    if let Some(member) = resource
        .members()
        .into_iter()
        .find(|member| member.name() == name)
    {
        return Some(member.value());
    }

    match resource.contract() {
        Contract::Dictionary(entries) => entries
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value)),
        Contract::Object(_) | Contract::Array(_) | Contract::Transparent(_) | Contract::Scalar => {
            None
        }
    }
}

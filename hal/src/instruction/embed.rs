use std::fmt;

use serde_json::Value;

use super::selector::MemberName;
use crate::contract::{self, Resource};
use crate::error::Result;

/// Where an embed takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedIndex {
    /// A member of the value; the member is removed from the serialized object
    Member(MemberName),
    /// The elements of the value itself; nothing is removed
    Elements,
}

impl EmbedIndex {
    /// Index of the member read by `selector`
    pub fn member(selector: &str) -> Result<Self> {
        MemberName::parse(selector).map(Self::Member)
    }

    /// Native member name, `None` for [`EmbedIndex::Elements`]
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Self::Member(name) => Some(name.as_str()),
            Self::Elements => None,
        }
    }

    /// The value this index points at within `main`
    pub fn value<'a>(&self, main: &'a dyn Resource) -> Option<&'a dyn Resource> {
        match self {
            Self::Member(name) => contract::member_value(main, name.as_str()),
            Self::Elements => Some(main),
        }
    }

    /// Elements of the collection this index points at within `main`
    pub fn elements<'a>(&self, main: &'a dyn Resource) -> Option<Vec<&'a dyn Resource>> {
        contract::elements(self.value(main)?)
    }
}

impl fmt::Display for EmbedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(name) => write!(f, "{name}"),
            Self::Elements => f.write_str("<elements>"),
        }
    }
}

/// Embeds a member, or the elements of a collection, under a relation
///
/// The embedded value is produced by visiting the native value again, so anything
/// registered below it is transformed as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedInstruction {
    relation:    String,
    index:       EmbedIndex,
    per_element: bool,
}

impl EmbedInstruction {
    /// Embed the value at `index` as a whole
    pub fn new(relation: impl Into<String>, index: EmbedIndex) -> Self {
        Self {
            relation: relation.into(),
            index,
            per_element: false,
        }
    }

    /// Embed each element of the collection at `index` individually
    pub fn per_element(relation: impl Into<String>, index: EmbedIndex) -> Self {
        Self {
            relation: relation.into(),
            index,
            per_element: true,
        }
    }

    /// Relation the value is embedded under
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Where the value comes from
    pub const fn index(&self) -> &EmbedIndex {
        &self.index
    }

    /// Produce the embedded subtree for `main`
    ///
    /// `visit` is the walker entry point. Returns `None` when the index does not point
    /// at anything within `main`.
    pub fn embed_value(
        &self,
        main: &dyn Resource,
        visit: &mut dyn FnMut(&dyn Resource) -> Result<Value>,
    ) -> Result<Option<Value>> {
        if !self.per_element {
            return match self.index.value(main) {
                Some(value) => visit(value).map(Some),
                None => Ok(None),
            };
        }

        let Some(elements) = self.index.elements(main) else {
            return Ok(None);
        };

        elements
            .into_iter()
            .map(|element| visit(element))
            .collect::<Result<Vec<_>>>()
            .map(|items| Some(Value::Array(items)))
    }
}

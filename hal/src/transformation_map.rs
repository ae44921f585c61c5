//! Typed construction of [`TransformationInstructions`]

use std::marker::PhantomData;

use error_stack::Report;

use crate::constants::SELF_RELATION;
use crate::contract::Resource;
use crate::error::{Error, Result};
use crate::instruction::{
    ElementLinkInstruction, EmbedIndex, EmbedInstruction, HoistInstruction, ManyLinkInstruction,
    MemberName, SingleLinkInstruction, TransformationInstructions,
};
use crate::link::LinkData;
use crate::type_key::TypeKey;

/// Builder for the transformation rules of `T`
///
/// Every map starts from the self link. Members are named by selector strings
/// (`"Name"`, `"x => x.Name"`, `"|x| x.name"`); a selector that is not a direct member
/// access fails the call with [`Error::MalformedSelector`](crate::Error).
///
/// ```
/// # use hal_transform::{HalContract, LinkData, TransformationMap};
/// # use serde::Serialize;
/// #[derive(Serialize, HalContract)]
/// struct Widget {
///     id:   u32,
///     name: String,
/// }
///
/// let map = TransformationMap::new(|w: &Widget| {
///     Some(LinkData::constant(format!("/widgets/{}", w.id)))
/// })
///     .link("up", |_| Some(LinkData::constant("/widgets")))
///     .embed("name", "|w| w.name", |_| None)?
///     .build();
/// assert_eq!(map.embeds().len(), 1);
/// # Ok::<(), error_stack::Report<hal_transform::Error>>(())
/// ```
pub struct TransformationMap<T> {
    instructions: TransformationInstructions,
    marker:       PhantomData<fn(&T)>,
}

impl<T: Resource> TransformationMap<T> {
    /// Start a map with the self link of `T`
    pub fn new(self_link: impl Fn(&T) -> Option<LinkData> + Send + Sync + 'static) -> Self {
        let mut instructions = TransformationInstructions::new(TypeKey::of::<T>());
        instructions.set_link(SELF_RELATION, Box::new(SingleLinkInstruction::new(self_link)));
        Self {
            instructions,
            marker: PhantomData,
        }
    }

    /// Type the map is built for
    pub const fn type_key(&self) -> TypeKey {
        self.instructions.type_key()
    }

    /// Add a singular relation; a later registration of the same relation replaces it
    #[must_use]
    pub fn link(
        mut self,
        relation: impl Into<String>,
        selector: impl Fn(&T) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Self {
        self.instructions
            .set_link(relation, Box::new(SingleLinkInstruction::new(selector)));
        self
    }

    /// Add a plural relation with one link per element of a collection
    #[must_use]
    pub fn links<E: 'static>(
        mut self,
        relation: impl Into<String>,
        collection: impl Fn(&T) -> &[E] + Send + Sync + 'static,
        element: impl Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Self {
        self.instructions.set_link(
            relation,
            Box::new(ManyLinkInstruction::new(collection, element)),
        );
        self
    }

    /// Embed a member under `relation` and link to it under the same relation
    ///
    /// The member is removed from the serialized object. The `self` relation is
    /// reserved and rejected.
    pub fn embed(
        mut self,
        relation: impl Into<String>,
        member: &str,
        link: impl Fn(&T) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Result<Self> {
        let relation = embed_relation(relation)?;
        let index = EmbedIndex::member(member)?;
        self.instructions
            .set_link(relation.clone(), Box::new(SingleLinkInstruction::new(link)));
        self.instructions
            .push_embed(EmbedInstruction::new(relation, index));
        Ok(self)
    }

    /// Embed each element of a collection member individually, linking each one
    ///
    /// The elements are written as an array under `relation` and the member is removed
    /// from the serialized object.
    pub fn embed_elements<E: 'static>(
        mut self,
        relation: impl Into<String>,
        member: &str,
        element_link: impl Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Result<Self> {
        let relation = embed_relation(relation)?;
        let index = EmbedIndex::member(member)?;
        self.add_element_embed(relation, index, element_link);
        Ok(self)
    }

    /// Embed each item of a collection type individually, linking each one
    ///
    /// Only meaningful when `T` itself is array-like. Nothing is removed, since the
    /// items are not a member of anything. The wrapped items already sit under
    /// `_embedded.self`, so `self` is rejected as a relation.
    pub fn embed_items<E: 'static>(
        mut self,
        relation: impl Into<String>,
        element_link: impl Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Result<Self> {
        let relation = embed_relation(relation)?;
        self.add_element_embed(relation, EmbedIndex::Elements, element_link);
        Ok(self)
    }

    fn add_element_embed<E: 'static>(
        &mut self,
        relation: String,
        index: EmbedIndex,
        element_link: impl Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    ) {
        self.instructions.set_link(
            relation.clone(),
            Box::new(ElementLinkInstruction::new(index.clone(), element_link)),
        );
        self.instructions
            .push_embed(EmbedInstruction::per_element(relation, index));
    }

    /// Copy a member onto the object wrapping an array-like `T`
    ///
    /// Has no effect for object-like types, whose members are already top level.
    pub fn hoist(mut self, member: &str) -> Result<Self> {
        self.instructions.push_hoist(HoistInstruction::new(member)?);
        Ok(self)
    }

    /// Remove members from the serialized object
    pub fn ignore<'s>(mut self, members: impl IntoIterator<Item = &'s str>) -> Result<Self> {
        for member in members {
            let name = MemberName::parse(member)?;
            self.instructions.push_ignore(name.as_str());
        }
        Ok(self)
    }

    /// Link under `relation` and remove `member` from the serialized object
    ///
    /// The link is always added. When `member` is not a direct member access the
    /// ignore is skipped without error, and the member stays in the output.
    #[must_use]
    pub fn link_and_ignore(
        mut self,
        relation: impl Into<String>,
        member: &str,
        selector: impl Fn(&T) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Self {
        let relation = relation.into();
        match MemberName::parse(member) {
            Ok(name) => self.instructions.push_ignore(name.as_str()),
            Err(error) => tracing::debug!(
                type_name = %self.type_key().short_name(),
                relation = %relation,
                member,
                error = %error.current_context(),
                "member is not a direct access, not ignoring it"
            ),
        }
        self.instructions
            .set_link(relation, Box::new(SingleLinkInstruction::new(selector)));
        self
    }

    /// Finish the map
    pub fn build(self) -> TransformationInstructions {
        self.instructions
    }
}

/// Relation of a new embed; `self` holds the wrapped items of collections
fn embed_relation(relation: impl Into<String>) -> Result<String> {
    let relation = relation.into();
    if relation == SELF_RELATION {
        return Err(Report::new(Error::invalid(
            "embed relation",
            format_args!("'{SELF_RELATION}' is reserved for the resource itself"),
        )));
    }
    Ok(relation)
}

//! The tree-walking transformation engine
//!
//! A walk pairs each native value with the JSON the serializer produced for it, top
//! down. At every node the contract decides the shape:
//! - object-like and dictionary-like values gain `_links` and `_embedded` members
//! - array-like values are wrapped in an object holding the items under
//!   `_embedded.self`
//! - transparent wrappers are looked through, scalars are left alone
//!
//! Only exactly registered types are transformed. Anything else is returned as the
//! serializer wrote it, children included.
//!
//! Each node's JSON is owned by the call visiting it and handed back to the parent,
//! which puts it in place of the JSON it handed down. Children are always visited
//! before the parent's own links and embeds are computed, and embeds are applied
//! before ignores.

mod array_walker;
mod dictionary_walker;
mod key_naming;
mod object_walker;
mod visit_context;

use error_stack::ResultExt;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use self::array_walker::ArrayWalker;
use self::dictionary_walker::DictionaryWalker;
use self::object_walker::ObjectWalker;
use self::visit_context::VisitContext;
use crate::contract::{Contract, Resource};
use crate::error::{Error, Result};
use crate::instruction::EmbedInstruction;
use crate::link::UrlResolver;
use crate::repository::Repository;
use crate::transformer::TypeTransformer;

/// Transforms serialized values into HAL documents
///
/// Holds no state of its own beyond the repository and URL resolver it borrows; one
/// walker can transform any number of values.
pub struct Walker<'a> {
    repository: &'a Repository,
    urls:       &'a dyn UrlResolver,
}

impl<'a> Walker<'a> {
    /// Walker using the rules of `repository`, resolving endpoint links through `urls`
    pub const fn new(repository: &'a Repository, urls: &'a dyn UrlResolver) -> Self {
        Self { repository, urls }
    }

    /// Transform `json`, the serialized form of `value`
    ///
    /// Dictionary keys in `json` are expected under the configured
    /// [`KeyNaming`](crate::KeyNaming), as the serializer wrote them.
    pub fn visit(&self, value: &dyn Resource, json: Value) -> Result<Value> {
        self.visit_node(&VisitContext::root(), value, json)
    }

    /// Serialize `value` and transform the result
    pub fn transform(&self, value: &dyn Resource) -> Result<Value> {
        self.transform_node(&VisitContext::root(), value)
    }

    /// Serialize `value`, transform it and write the HAL document
    pub fn to_string(&self, value: &dyn Resource) -> Result<String> {
        let document = self.transform(value)?;
        serde_json::to_string(&document)
            .change_context_lazy(|| Error::serialization_failed(value.type_key().name()))
    }

    pub(crate) const fn repository(&self) -> &'a Repository {
        self.repository
    }

    /// Serialize a native value with the configured dictionary key naming
    pub(crate) fn serialize(&self, value: &dyn Resource) -> Result<Value> {
        let json = value.to_json()?;
        Ok(key_naming::apply(
            self.repository.config().dictionary_key_naming,
            value,
            json,
        ))
    }

    /// Serialize a native value and visit it at `ctx`
    pub(crate) fn transform_node(&self, ctx: &VisitContext, value: &dyn Resource) -> Result<Value> {
        let json = self.serialize(value)?;
        self.visit_node(ctx, value, json)
    }

    /// Visit one node, dispatching on the shape of the native value
    pub(crate) fn visit_node(
        &self,
        ctx: &VisitContext,
        value: &dyn Resource,
        json: Value,
    ) -> Result<Value> {
        if json.is_null() {
            return Ok(Value::Null);
        }

        let contract = value.contract();
        trace!(
            path = %ctx,
            depth = ctx.depth,
            shape = %contract.kind(),
            type_name = %value.type_key().short_name(),
            "visiting node"
        );

        match contract {
            Contract::Transparent(None) => Ok(Value::Null),
            Contract::Transparent(Some(inner)) => self.visit_node(ctx, inner, json),
            Contract::Scalar => Ok(json),
            Contract::Object(_) | Contract::Array(_) | Contract::Dictionary(_) => {
                let Some(transformer) = self
                    .repository
                    .try_get_transformer(value.type_key(), self.urls)
                else {
                    debug!(
                        path = %ctx,
                        type_name = %value.type_key().short_name(),
                        "type not registered, passing through"
                    );
                    return Ok(json);
                };

                let node = Node {
                    ctx,
                    value,
                    transformer,
                };
                match (contract, json) {
                    (Contract::Object(members), Value::Object(object)) => {
                        ObjectWalker::walk(self, &node, &members, object)
                    }
                    (Contract::Array(elements), Value::Array(items)) => {
                        ArrayWalker::walk(self, &node, &elements, items)
                    }
                    (Contract::Dictionary(entries), Value::Object(object)) => {
                        DictionaryWalker::walk(self, &node, &entries, object)
                    }
                    (contract, json) => {
                        warn!(
                            path = %ctx,
                            type_name = %value.type_key().short_name(),
                            shape = %contract.kind(),
                            "serialized form does not match the contract, passing through"
                        );
                        Ok(json)
                    }
                }
            }
        }
    }
}

/// A registered node being transformed
pub(crate) struct Node<'n, 'a> {
    pub ctx:         &'n VisitContext,
    pub value:       &'n dyn Resource,
    pub transformer: TypeTransformer<'a>,
}

impl Node<'_, '_> {
    fn transformation_error(&self) -> Error {
        Error::Transformation {
            path:      self.ctx.path.clone(),
            type_name: self.value.type_key().name().to_string(),
        }
    }

    /// Wire form of the node's links, `None` when no relation holds a link
    pub fn links(&self) -> Result<Option<Value>> {
        self.transformer
            .generate_links(self.value)
            .and_then(|links| links.to_json())
            .change_context_lazy(|| self.transformation_error())
    }

    /// Compute every embed of the node
    ///
    /// `on_embed` is called for each embed after its value is computed, so callers can
    /// drop the source member.
    pub fn embedded(
        &self,
        walker: &Walker<'_>,
        mut on_embed: impl FnMut(&EmbedInstruction),
    ) -> Result<Map<String, Value>> {
        let mut embedded = Map::new();
        for embed in self.transformer.embeds() {
            let ctx = self.ctx.embedded(embed.relation());
            let value = embed.embed_value(self.value, &mut |value: &dyn Resource| {
                walker.transform_node(&ctx, value)
            })?;
            on_embed(embed);

            match value {
                Some(value) => {
                    embedded.insert(embed.relation().to_string(), value);
                }
                None => warn!(
                    path = %self.ctx,
                    relation = embed.relation(),
                    index = %embed.index(),
                    "embed index does not point at a value"
                ),
            }
        }
        Ok(embedded)
    }
}

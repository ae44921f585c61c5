//! Walker for array-like values
//!
//! A JSON array cannot carry `_links` or `_embedded`, so a registered collection is
//! replaced by a wrapper object. The transformed items go under `_embedded.self`,
//! next to any other embeds; hoisted members are set on the wrapper directly.

use serde_json::{Map, Value};
use tracing::debug;

use super::{Node, Walker};
use crate::constants::{EMBEDDED_KEY, LINKS_KEY, SELF_RELATION};
use crate::contract::Resource;
use crate::error::Result;

pub struct ArrayWalker;

impl ArrayWalker {
    pub fn walk(
        walker: &Walker<'_>,
        node: &Node<'_, '_>,
        elements: &[&dyn Resource],
        items: Vec<Value>,
    ) -> Result<Value> {
        if elements.len() != items.len() {
            debug!(
                path = %node.ctx,
                elements = elements.len(),
                items = items.len(),
                "element count differs from serialized item count"
            );
        }

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match elements.get(index) {
                Some(element) => walker.visit_node(&node.ctx.element(index), *element, item),
                None => Ok(item),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut wrapper = Map::new();
        if let Some(links) = node.links()? {
            wrapper.insert(LINKS_KEY.to_string(), links);
        }

        let mut embedded = Map::new();
        embedded.insert(SELF_RELATION.to_string(), Value::Array(items));
        embedded.extend(node.embedded(walker, |_| {})?);
        wrapper.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));

        for hoist in node.transformer.hoists() {
            match hoist.member(node.value) {
                Some(member) => {
                    wrapper.insert(
                        member.serialized_name().to_string(),
                        walker.serialize(member.value())?,
                    );
                }
                None => debug!(
                    path = %node.ctx,
                    member = hoist.name(),
                    "hoisted member not found, skipping"
                ),
            }
        }

        Ok(Value::Object(wrapper))
    }
}

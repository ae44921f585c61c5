//! Walker for object-like values
//!
//! Members are visited in the order the serializer wrote them. Links and embeds are
//! appended after the members; embedded members and ignored members are removed.

use serde_json::{Map, Value};

use super::{Node, Walker};
use crate::constants::{EMBEDDED_KEY, LINKS_KEY};
use crate::contract::Member;
use crate::error::Result;

pub struct ObjectWalker;

impl ObjectWalker {
    pub fn walk(
        walker: &Walker<'_>,
        node: &Node<'_, '_>,
        members: &[Member<'_>],
        object: Map<String, Value>,
    ) -> Result<Value> {
        let mut object = object
            .into_iter()
            .map(|(key, child)| -> Result<(String, Value)> {
                let child = match members.iter().find(|member| member.serialized_name() == key) {
                    Some(member) => {
                        walker.visit_node(&node.ctx.member(&key), member.value(), child)?
                    }
                    None => child,
                };
                Ok((key, child))
            })
            .collect::<Result<Map<_, _>>>()?;

        if let Some(links) = node.links()? {
            object.insert(LINKS_KEY.to_string(), links);
        }

        let embedded = node.embedded(walker, |embed| {
            if let Some(name) = embed.index().member_name() {
                object.shift_remove(serialized_name(members, name));
            }
        })?;
        if !embedded.is_empty() {
            object.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
        }

        for ignore in node.transformer.ignores() {
            object.shift_remove(serialized_name(members, ignore));
        }

        Ok(Value::Object(object))
    }
}

/// Serialized name of the member with this native name
///
/// Falls back to the native name when the contract does not declare the member.
fn serialized_name<'m>(members: &'m [Member<'_>], name: &'m str) -> &'m str {
    members
        .iter()
        .find(|member| member.name() == name)
        .map_or(name, Member::serialized_name)
}

//! Walker for dictionary-like values
//!
//! Like the object walker, except that members are entries: each native key goes
//! through the serializer's key naming before it is matched against the JSON object.

use serde_json::{Map, Value};

use super::{Node, Walker};
use crate::constants::{EMBEDDED_KEY, LINKS_KEY};
use crate::contract::Resource;
use crate::error::Result;

pub struct DictionaryWalker;

impl DictionaryWalker {
    pub fn walk(
        walker: &Walker<'_>,
        node: &Node<'_, '_>,
        entries: &[(String, &dyn Resource)],
        object: Map<String, Value>,
    ) -> Result<Value> {
        let naming = walker.repository().config().dictionary_key_naming;
        let keyed: Vec<(String, &dyn Resource)> = entries
            .iter()
            .map(|(key, value)| (naming.apply(key), *value))
            .collect();

        let mut object = object
            .into_iter()
            .map(|(key, child)| -> Result<(String, Value)> {
                let child = match keyed.iter().find(|(serialized, _)| *serialized == key) {
                    Some((_, value)) => walker.visit_node(&node.ctx.entry(&key), *value, child)?,
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
                object.shift_remove(&naming.apply(name));
            }
        })?;
        if !embedded.is_empty() {
            object.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
        }

        for ignore in node.transformer.ignores() {
            object.shift_remove(&naming.apply(ignore));
        }

        Ok(Value::Object(object))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;
    use serde_json::json;

    use crate::config::{HalConfig, KeyNaming};
    use crate::contract::{Contract, HalContract, Member};
    use crate::link::{LinkData, NoRoutes};
    use crate::repository::Repository;
    use crate::test_support::init_tracing;
    use crate::transformation_map::TransformationMap;
    use crate::walker::Walker;

    #[derive(Serialize)]
    struct Stock {
        count: u32,
    }

    impl HalContract for Stock {
        fn contract(&self) -> Contract<'_> {
            Contract::Object(vec![Member::new("count", &self.count)])
        }
    }

    /// Stock levels by bin, keys written in camel case
    #[derive(Serialize)]
    struct Inventory(BTreeMap<String, Option<Stock>>);

    impl HalContract for Inventory {
        fn contract(&self) -> Contract<'_> {
            crate::contract::Resource::contract(&self.0)
        }
    }

    fn serialized(inventory: &Inventory) -> serde_json::Value {
        let entries = inventory
            .0
            .iter()
            .map(|(key, stock)| {
                (
                    KeyNaming::CamelCase.apply(key),
                    serde_json::to_value(stock).unwrap(),
                )
            })
            .collect();
        serde_json::Value::Object(entries)
    }

    fn inventory() -> Inventory {
        Inventory(BTreeMap::from([
            ("back_shelf".to_string(), Some(Stock { count: 2 })),
            ("front_shelf".to_string(), None),
            ("top_shelf".to_string(), Some(Stock { count: 5 })),
        ]))
    }

    fn repository() -> Repository {
        Repository::builder()
            .config(HalConfig {
                dictionary_key_naming: KeyNaming::CamelCase,
                ..HalConfig::default()
            })
            .register(TransformationMap::new(|stock: &Stock| {
                Some(LinkData::constant(format!("/stock/{}", stock.count)))
            }))
            .unwrap()
            .register(
                TransformationMap::new(|_: &Inventory| Some(LinkData::constant("/inventory")))
                    .embed("top", "top_shelf", |_| None)
                    .unwrap()
                    .ignore(["front_shelf"])
                    .unwrap(),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_entries_follow_key_naming() {
        init_tracing();
        let repository = repository();
        let value = inventory();

        let document = Walker::new(&repository, &NoRoutes)
            .visit(&value, serialized(&value))
            .unwrap();
        assert_eq!(
            document,
            json!({
                "backShelf": { "count": 2, "_links": { "self": { "href": "/stock/2" } } },
                "_links": { "self": { "href": "/inventory" } },
                "_embedded": {
                    "top": { "count": 5, "_links": { "self": { "href": "/stock/5" } } }
                }
            })
        );
    }

    #[test]
    fn test_transform_writes_entries_under_the_configured_naming() {
        init_tracing();
        let repository = repository();

        let document = Walker::new(&repository, &NoRoutes)
            .transform(&inventory())
            .unwrap();
        assert_eq!(
            document,
            json!({
                "backShelf": { "count": 2, "_links": { "self": { "href": "/stock/2" } } },
                "_links": { "self": { "href": "/inventory" } },
                "_embedded": {
                    "top": { "count": 5, "_links": { "self": { "href": "/stock/5" } } }
                }
            })
        );
    }

    #[test]
    fn test_null_entries_stay_null() {
        init_tracing();
        let repository = Repository::builder()
            .register(TransformationMap::new(|_: &Inventory| None))
            .unwrap()
            .build();
        let value = inventory();

        let document = Walker::new(&repository, &NoRoutes).transform(&value).unwrap();
        assert_eq!(
            document,
            json!({
                "back_shelf": { "count": 2 },
                "front_shelf": null,
                "top_shelf": { "count": 5 }
            })
        );
    }
}

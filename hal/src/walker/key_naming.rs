//! Dictionary key naming for trees the walker serializes itself
//!
//! `serde_json` writes map keys exactly as the native key renders. The configured
//! [`KeyNaming`] describes the serializer the documents are written for, and the
//! dictionary walker matches entries under the renamed keys, so every tree produced
//! through [`Resource::to_json`] is renamed the same way before it is walked.

use serde_json::{Map, Value};

use crate::config::KeyNaming;
use crate::contract::{Contract, Resource};

/// Rename the dictionary keys of `json`, the plain serialized form of `value`
pub fn apply(naming: KeyNaming, value: &dyn Resource, json: Value) -> Value {
    if naming == KeyNaming::AsIs {
        return json;
    }
    rename(naming, value, json)
}

fn rename(naming: KeyNaming, value: &dyn Resource, json: Value) -> Value {
    match (value.contract(), json) {
        (Contract::Transparent(Some(inner)), json) => rename(naming, inner, json),
        (Contract::Object(members), Value::Object(object)) => Value::Object(
            object
                .into_iter()
                .map(|(key, child)| {
                    let member = members
                        .iter()
                        .find(|member| member.serialized_name() == key);
                    let child = match member {
                        Some(member) => rename(naming, member.value(), child),
                        None => child,
                    };
                    (key, child)
                })
                .collect(),
        ),
        (Contract::Array(elements), Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match elements.get(index) {
                    Some(element) => rename(naming, *element, item),
                    None => item,
                })
                .collect(),
        ),
        (Contract::Dictionary(entries), Value::Object(object)) => {
            let mut renamed = Map::new();
            for (key, child) in object {
                match entries.iter().find(|(native, _)| *native == key) {
                    Some((native, entry)) => {
                        renamed.insert(naming.apply(native), rename(naming, *entry, child));
                    }
                    None => {
                        renamed.insert(key, child);
                    }
                }
            }
            Value::Object(renamed)
        }
        (_, json) => json,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;
    use serde_json::json;

    use super::*;
    use crate::contract::{HalContract, Member};

    #[derive(Serialize)]
    struct Shelf {
        bin_labels: BTreeMap<String, Vec<BTreeMap<String, u32>>>,
        shelf_name: String,
    }

    impl HalContract for Shelf {
        fn contract(&self) -> Contract<'_> {
            Contract::Object(vec![
                Member::new("bin_labels", &self.bin_labels),
                Member::new("shelf_name", &self.shelf_name),
            ])
        }
    }

    fn shelf() -> Option<Shelf> {
        Some(Shelf {
            bin_labels: BTreeMap::from([(
                "left_bin".to_string(),
                vec![BTreeMap::from([("part_count".to_string(), 3)])],
            )]),
            shelf_name: "top_shelf".to_string(),
        })
    }

    #[test]
    fn test_only_dictionary_keys_are_renamed() {
        let shelf = shelf();
        let json = shelf.to_json().unwrap();

        assert_eq!(
            apply(KeyNaming::CamelCase, &shelf, json),
            json!({
                "bin_labels": { "leftBin": [{ "partCount": 3 }] },
                "shelf_name": "top_shelf"
            })
        );
    }

    #[test]
    fn test_as_is_leaves_the_tree_alone() {
        let shelf = shelf();
        let json = shelf.to_json().unwrap();

        assert_eq!(apply(KeyNaming::AsIs, &shelf, json.clone()), json);
    }
}

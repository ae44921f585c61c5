//! Resolved links and their grouping by relation
//!
//! A relation is either singular ("self", "up") or plural ("item"). A singular
//! relation holding exactly one link is written as a bare link object; every other
//! non-empty relation is written as an array. Empty relations are left out.

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::data::LinkMetadata;
use crate::error::{Error, Result};

/// A resolved hyperlink as written under `_links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URI, or URI template when `templated` is set
    pub href:        String,
    /// Whether `href` is a URI template
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated:   bool,
    /// Media type hint of the target resource
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type:  Option<String>,
    /// URI describing the deprecation of the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,
    /// Secondary key for selecting among links sharing a relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name:        Option<String>,
    /// URI of a profile of the target resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile:     Option<String>,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title:       Option<String>,
    /// Language of the target resource
    #[serde(rename = "hreflang", default, skip_serializing_if = "Option::is_none")]
    pub href_lang:   Option<String>,
}

impl Link {
    /// Link to `href` carrying the given metadata
    pub fn new(href: impl Into<String>, templated: bool, metadata: &LinkMetadata) -> Self {
        Self {
            href: href.into(),
            templated,
            media_type: metadata.media_type.clone(),
            deprecation: metadata.deprecation.clone(),
            name: metadata.name.clone(),
            profile: metadata.profile.clone(),
            title: metadata.title.clone(),
            href_lang: metadata.href_lang.clone(),
        }
    }

    fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).change_context_lazy(|| Error::serialization_failed("Link"))
    }
}

/// The links generated for one relation and cardinality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCollection {
    links:    Vec<Link>,
    singular: bool,
}

impl LinkCollection {
    /// Empty collection
    pub const fn new(singular: bool) -> Self {
        Self {
            links: Vec::new(),
            singular,
        }
    }

    /// Whether the relation is naturally singular
    pub const fn is_singular(&self) -> bool {
        self.singular
    }

    /// Links in generation order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of links
    pub const fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link was generated
    pub const fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Append a link
    pub fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Wire form of the collection, `None` when it is empty
    pub fn to_json(&self) -> Result<Option<Value>> {
        match self.links.as_slice() {
            [] => Ok(None),
            [link] if self.singular => link.to_json().map(Some),
            links => links_to_array(links.iter()).map(Some),
        }
    }
}

fn links_to_array<'a>(links: impl Iterator<Item = &'a Link>) -> Result<Value> {
    links
        .map(Link::to_json)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Grouping key of a [`LinkCollection`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    /// Relation name, compared ordinally
    pub relation: String,
    /// Cardinality of the instruction that produced the links
    pub singular: bool,
}

/// Links of one resource grouped by relation and cardinality
///
/// Groups keep the order in which they were first produced, and links keep their
/// generation order within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMap {
    groups: Vec<(LinkKey, LinkCollection)>,
}

impl LinkMap {
    /// Group a stream of `(relation, singular, link)` entries
    pub fn from_links(links: impl IntoIterator<Item = (String, bool, Link)>) -> Self {
        let mut map = Self::default();
        for (relation, singular, link) in links {
            map.push(&relation, singular, link);
        }
        map
    }

    /// Collection for `relation` and `singular`, created empty if missing
    pub fn entry(&mut self, relation: &str, singular: bool) -> &mut LinkCollection {
        let position = self
            .groups
            .iter()
            .position(|(key, _)| key.singular == singular && key.relation == relation);

        let index = position.unwrap_or_else(|| {
            self.groups.push((
                LinkKey {
                    relation: relation.to_string(),
                    singular,
                },
                LinkCollection::new(singular),
            ));
            self.groups.len() - 1
        });

        &mut self.groups[index].1
    }

    /// Append a link to its group
    pub fn push(&mut self, relation: &str, singular: bool, link: Link) {
        self.entry(relation, singular).push(link);
    }

    /// Collection for `relation` and `singular`
    pub fn get(&self, relation: &str, singular: bool) -> Option<&LinkCollection> {
        self.groups
            .iter()
            .find(|(key, _)| key.singular == singular && key.relation == relation)
            .map(|(_, collection)| collection)
    }

    /// All groups in production order
    pub fn iter(&self) -> impl Iterator<Item = (&LinkKey, &LinkCollection)> {
        self.groups.iter().map(|(key, collection)| (key, collection))
    }

    /// Number of groups, including empty ones
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group exists
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether at least one group holds a link
    pub fn has_links(&self) -> bool {
        self.groups.iter().any(|(_, collection)| !collection.is_empty())
    }

    /// Wire form of the `_links` object, `None` when no group holds a link
    ///
    /// A relation produced with both cardinalities is written once, as an array of
    /// the singular group's links followed by the plural group's.
    pub fn to_json(&self) -> Result<Option<Value>> {
        let mut relations: Vec<&str> = Vec::new();
        for (key, _) in &self.groups {
            if !relations.contains(&key.relation.as_str()) {
                relations.push(&key.relation);
            }
        }

        let mut links = Map::new();
        for relation in relations {
            let groups: Vec<&LinkCollection> = self
                .groups
                .iter()
                .filter(|(key, _)| key.relation == relation)
                .map(|(_, collection)| collection)
                .collect();

            let value = match groups.as_slice() {
                [collection] => collection.to_json()?,
                collections => {
                    let mut merged = collections
                        .iter()
                        .flat_map(|collection| collection.links())
                        .peekable();
                    if merged.peek().is_some() {
                        Some(links_to_array(merged)?)
                    } else {
                        None
                    }
                }
            };

            if let Some(value) = value {
                links.insert(relation.to_string(), value);
            }
        }

        Ok((!links.is_empty()).then_some(Value::Object(links)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use serde_json::json;

    use super::*;

    fn link(href: &str) -> Link {
        Link::new(href, false, &LinkMetadata::default())
    }

    #[test]
    fn test_link_serializes_hal_members() {
        let metadata = LinkMetadata {
            media_type: Some("application/hal+json".to_string()),
            href_lang: Some("en".to_string()),
            ..LinkMetadata::default()
        };
        let templated = Link::new("/widgets{?page}", true, &metadata);

        assert_eq!(
            serde_json::to_value(&templated).unwrap(),
            json!({
                "href": "/widgets{?page}",
                "templated": true,
                "type": "application/hal+json",
                "hreflang": "en"
            })
        );
        assert_eq!(serde_json::to_value(link("/a")).unwrap(), json!({ "href": "/a" }));
    }

    #[test]
    fn test_collection_wire_form() {
        let mut singular = LinkCollection::new(true);
        assert_eq!(singular.to_json().unwrap(), None);

        singular.push(link("/a"));
        assert_eq!(singular.to_json().unwrap(), Some(json!({ "href": "/a" })));

        singular.push(link("/b"));
        assert_eq!(
            singular.to_json().unwrap(),
            Some(json!([{ "href": "/a" }, { "href": "/b" }]))
        );

        let mut plural = LinkCollection::new(false);
        plural.push(link("/a"));
        assert_eq!(plural.to_json().unwrap(), Some(json!([{ "href": "/a" }])));
    }

    #[test]
    fn test_grouping_keys_on_relation_and_cardinality() {
        let map = LinkMap::from_links([
            ("item".to_string(), true, link("/one")),
            ("item".to_string(), false, link("/two")),
            ("item".to_string(), false, link("/three")),
            ("Item".to_string(), false, link("/four")),
        ]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("item", true).map(LinkCollection::len), Some(1));
        let plural = map.get("item", false).expect("plural group");
        assert_eq!(
            plural.links().iter().map(|l| l.href.as_str()).collect::<Vec<_>>(),
            ["/two", "/three"]
        );
        assert_eq!(map.get("Item", false).map(LinkCollection::len), Some(1));

        assert_eq!(
            map.to_json().unwrap(),
            Some(json!({
                "item": [{ "href": "/one" }, { "href": "/two" }, { "href": "/three" }],
                "Item": [{ "href": "/four" }]
            }))
        );
    }

    #[test]
    fn test_empty_groups_are_reported_but_not_written() {
        let mut map = LinkMap::default();
        map.entry("item", false);

        assert!(!map.is_empty());
        assert!(!map.has_links());
        assert_eq!(map.to_json().unwrap(), None);
    }
}

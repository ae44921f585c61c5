use super::EmbedIndex;
use crate::contract::{self, Resource};
use crate::link::LinkData;
use crate::type_key::TypeKey;

/// Produces the link data of one relation for a value of a registered type
pub trait LinkInstruction: Send + Sync {
    /// Whether the relation holds at most one link for `main`
    fn is_singular(&self, main: &dyn Resource) -> bool;

    /// Link data for `main`, in generation order
    fn to_link_data(&self, main: &dyn Resource) -> Vec<LinkData>;
}

/// Downcast the value a transformer was looked up for to its registered type
fn downcast<T: 'static>(main: &dyn Resource) -> Option<&T> {
    let value = main.as_any().downcast_ref::<T>();
    if value.is_none() {
        tracing::warn!(
            expected = %TypeKey::of::<T>().short_name(),
            actual = %main.type_key().short_name(),
            "link instruction applied to a value of another type"
        );
    }
    value
}

type Selector<T> = Box<dyn Fn(&T) -> Option<LinkData> + Send + Sync>;

/// One optional link, always singular
pub struct SingleLinkInstruction<T> {
    selector: Selector<T>,
}

impl<T: 'static> SingleLinkInstruction<T> {
    /// Link selected from the value; `None` produces no link
    pub fn new(selector: impl Fn(&T) -> Option<LinkData> + Send + Sync + 'static) -> Self {
        Self {
            selector: Box::new(selector),
        }
    }
}

impl<T: 'static> LinkInstruction for SingleLinkInstruction<T> {
    fn is_singular(&self, _main: &dyn Resource) -> bool {
        true
    }

    fn to_link_data(&self, main: &dyn Resource) -> Vec<LinkData> {
        downcast::<T>(main)
            .and_then(|value| (self.selector)(value))
            .into_iter()
            .collect()
    }
}

/// Any number of links, one per element of a collection, always plural
pub struct ManyLinkInstruction<T> {
    selector: Box<dyn Fn(&T) -> Vec<LinkData> + Send + Sync>,
}

impl<T: 'static> ManyLinkInstruction<T> {
    /// Links selected per element of a collection read from the value
    ///
    /// Elements whose selector yields `None` produce no link.
    pub fn new<E, C, S>(collection: C, element: S) -> Self
    where
        E: 'static,
        C: Fn(&T) -> &[E] + Send + Sync + 'static,
        S: Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    {
        Self {
            selector: Box::new(move |value: &T| {
                collection(value).iter().filter_map(&element).collect()
            }),
        }
    }
}

impl<T: 'static> LinkInstruction for ManyLinkInstruction<T> {
    fn is_singular(&self, _main: &dyn Resource) -> bool {
        false
    }

    fn to_link_data(&self, main: &dyn Resource) -> Vec<LinkData> {
        downcast::<T>(main)
            .map(|value| (self.selector)(value))
            .unwrap_or_default()
    }
}

/// One link per element of an embedded collection, always plural
///
/// The elements are found through the value's contract rather than a typed accessor,
/// the same way the embed they accompany finds them.
pub struct ElementLinkInstruction<E> {
    index:    EmbedIndex,
    selector: Selector<E>,
}

impl<E: 'static> ElementLinkInstruction<E> {
    /// Links for the elements found at `index`
    pub fn new(
        index: EmbedIndex,
        selector: impl Fn(&E) -> Option<LinkData> + Send + Sync + 'static,
    ) -> Self {
        Self {
            index,
            selector: Box::new(selector),
        }
    }
}

impl<E: 'static> LinkInstruction for ElementLinkInstruction<E> {
    fn is_singular(&self, _main: &dyn Resource) -> bool {
        false
    }

    fn to_link_data(&self, main: &dyn Resource) -> Vec<LinkData> {
        let Some(elements) = self.index.elements(main) else {
            return Vec::new();
        };

        elements
            .into_iter()
            .filter_map(|element| {
                let resolved = contract::resolve(element)?;
                let Some(value) = resolved.as_any().downcast_ref::<E>() else {
                    tracing::warn!(
                        index = %self.index,
                        expected = %TypeKey::of::<E>().short_name(),
                        actual = %resolved.type_key().short_name(),
                        "collection element has an unexpected type, no link generated"
                    );
                    return None;
                };
                (self.selector)(value)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::contract::{Contract, HalContract, Member};
    use crate::link::LinkTarget;

    #[derive(Serialize)]
    struct Part {
        id: u32,
    }

    impl HalContract for Part {
        fn contract(&self) -> Contract<'_> {
            Contract::Object(vec![Member::new("id", &self.id)])
        }
    }

    #[derive(Serialize)]
    struct Widget {
        name:  Option<String>,
        parts: Vec<Part>,
    }

    impl HalContract for Widget {
        fn contract(&self) -> Contract<'_> {
            Contract::Object(vec![
                Member::new("name", &self.name),
                Member::new("parts", &self.parts),
            ])
        }
    }

    fn widget() -> Widget {
        Widget {
            name:  None,
            parts: vec![Part { id: 1 }, Part { id: 2 }],
        }
    }

    fn part_link(part: &Part) -> Option<LinkData> {
        (part.id != 2).then(|| LinkData::constant(format!("/parts/{}", part.id)))
    }

    fn hrefs(data: &[LinkData]) -> Vec<&str> {
        data.iter()
            .filter_map(|data| match data.target() {
                LinkTarget::Constant { href } => Some(href.as_str()),
                LinkTarget::Templated { .. } | LinkTarget::Endpointed { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_single_link_skips_absent_values() {
        let instruction = SingleLinkInstruction::new(|widget: &Widget| {
            widget.name.as_ref().map(|name| LinkData::constant(format!("/{name}")))
        });
        let mut named = widget();

        assert!(instruction.is_singular(&named));
        assert!(instruction.to_link_data(&named).is_empty());

        named.name = Some("gear".to_string());
        assert_eq!(hrefs(&instruction.to_link_data(&named)), ["/gear"]);
    }

    #[test]
    fn test_many_links_filter_absent_entries() {
        let instruction =
            ManyLinkInstruction::new(|widget: &Widget| widget.parts.as_slice(), part_link);
        let widget = widget();

        assert!(!instruction.is_singular(&widget));
        assert_eq!(hrefs(&instruction.to_link_data(&widget)), ["/parts/1"]);
    }

    #[test]
    fn test_element_links_follow_the_embed_index() {
        let instruction =
            ElementLinkInstruction::new(EmbedIndex::member("parts").unwrap(), part_link);
        assert_eq!(hrefs(&instruction.to_link_data(&widget())), ["/parts/1"]);

        let items = ElementLinkInstruction::new(EmbedIndex::Elements, part_link);
        let parts = vec![Part { id: 1 }, Part { id: 3 }];
        assert_eq!(hrefs(&items.to_link_data(&parts)), ["/parts/1", "/parts/3"]);
    }

    #[test]
    fn test_wrong_value_type_produces_nothing() {
        let instruction = SingleLinkInstruction::new(|_: &Widget| Some(LinkData::constant("/")));
        assert!(instruction.to_link_data(&7_u32).is_empty());

        let items = ElementLinkInstruction::new(EmbedIndex::Elements, part_link);
        assert!(items.to_link_data(&vec![1_u32, 2]).is_empty());
    }
}

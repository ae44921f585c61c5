//! Turning [`LinkData`] into [`Link`]s
//!
//! Builders are registered per [`LinkKind`] once, at startup. Dispatch is a plain map
//! lookup on the variant tag of the data being built.

use std::collections::HashMap;

use error_stack::Report;
use url::Url;

use super::data::{LinkData, LinkKind, LinkTarget};
use super::hal_link::Link;
use super::routing::UrlResolver;
use crate::error::{Error, Result};

/// Builds links of one [`LinkKind`]
pub trait LinkBuilder: Send + Sync {
    /// Resolve `data` into a link, using `urls` for named routes
    fn build(&self, data: &LinkData, urls: &dyn UrlResolver) -> Result<Link>;
}

/// Passes the URI through; absolute URIs are written in normalized absolute form
pub struct ConstantLinkBuilder;

impl LinkBuilder for ConstantLinkBuilder {
    fn build(&self, data: &LinkData, _urls: &dyn UrlResolver) -> Result<Link> {
        let LinkTarget::Constant { href } = data.target() else {
            return Err(mismatched(data));
        };

        let href = match Url::parse(href) {
            Ok(absolute) => absolute.to_string(),
            Err(reason) => {
                tracing::trace!(href, %reason, "keeping relative link as given");
                href.clone()
            }
        };

        Ok(Link::new(href, false, data.metadata()))
    }
}

/// Writes the template unexpanded; templated links are expanded by the client
pub struct TemplatedLinkBuilder;

impl LinkBuilder for TemplatedLinkBuilder {
    fn build(&self, data: &LinkData, _urls: &dyn UrlResolver) -> Result<Link> {
        let LinkTarget::Templated { template } = data.target() else {
            return Err(mismatched(data));
        };

        validate_template(template)?;
        Ok(Link::new(template.clone(), true, data.metadata()))
    }
}

/// Resolves a route name and its parameters through the [`UrlResolver`]
pub struct EndpointLinkBuilder;

impl LinkBuilder for EndpointLinkBuilder {
    fn build(&self, data: &LinkData, urls: &dyn UrlResolver) -> Result<Link> {
        let LinkTarget::Endpointed { name, values } = data.target() else {
            return Err(mismatched(data));
        };

        let Some(href) = urls.resolve(name, values) else {
            return Err(Report::new(Error::UnknownRoute { name: name.clone() }));
        };

        Ok(Link::new(href, false, data.metadata()))
    }
}

fn mismatched(data: &LinkData) -> Report<Error> {
    Report::new(Error::MissingLinkBuilder { kind: data.kind() })
}

/// Check that every expression of a URI template is closed and non-empty
///
/// Expansion against no variables leaves the template unchanged, so this is the only
/// work a templated link needs.
fn validate_template(template: &str) -> Result<()> {
    let mut open: Option<usize> = None;
    for (position, ch) in template.char_indices() {
        match (ch, open) {
            ('{', None) => open = Some(position),
            ('{', Some(_)) => {
                return Err(Report::new(Error::malformed_template(
                    template,
                    format!("nested '{{' at offset {position}"),
                )));
            }
            ('}', None) => {
                return Err(Report::new(Error::malformed_template(
                    template,
                    format!("unmatched '}}' at offset {position}"),
                )));
            }
            ('}', Some(start)) => {
                if position == start + 1 {
                    return Err(Report::new(Error::malformed_template(
                        template,
                        format!("empty expression at offset {start}"),
                    )));
                }
                open = None;
            }
            _ => {}
        }
    }

    match open {
        Some(start) => Err(Report::new(Error::malformed_template(
            template,
            format!("unclosed expression at offset {start}"),
        ))),
        None => Ok(()),
    }
}

/// Link builders keyed by the link kind they handle
pub struct LinkBuilders {
    builders: HashMap<LinkKind, Box<dyn LinkBuilder>>,
}

impl LinkBuilders {
    /// No builders at all
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Builders for the constant, templated and endpoint kinds
    pub fn standard() -> Self {
        let mut builders = Self::empty();
        builders.register(LinkKind::Constant, ConstantLinkBuilder);
        builders.register(LinkKind::Templated, TemplatedLinkBuilder);
        builders.register(LinkKind::Endpointed, EndpointLinkBuilder);
        builders
    }

    /// Register or replace the builder for `kind`
    pub fn register(&mut self, kind: LinkKind, builder: impl LinkBuilder + 'static) {
        self.builders.insert(kind, Box::new(builder));
    }

    /// Whether a builder is registered for `kind`
    pub fn contains(&self, kind: LinkKind) -> bool {
        self.builders.contains_key(&kind)
    }

    /// Build `data` with the builder registered for its kind
    pub fn build(&self, data: &LinkData, urls: &dyn UrlResolver) -> Result<Link> {
        let Some(builder) = self.builders.get(&data.kind()) else {
            return Err(mismatched(data));
        };
        builder.build(data, urls)
    }
}

impl Default for LinkBuilders {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for LinkBuilders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkBuilders")
            .field("kinds", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::link::routing::{NoRoutes, RouteTable};

    #[test]
    fn test_constant_links() {
        let builders = LinkBuilders::standard();

        let relative = builders
            .build(&LinkData::constant("/widgets/1"), &NoRoutes)
            .unwrap();
        assert_eq!(relative.href, "/widgets/1");
        assert!(!relative.templated);

        let absolute = builders
            .build(&LinkData::constant("HTTPS://Example.com"), &NoRoutes)
            .unwrap();
        assert_eq!(absolute.href, "https://example.com/");

        let urn = builders
            .build(&LinkData::constant("urn:x").with_title("X"), &NoRoutes)
            .unwrap();
        assert_eq!(urn.href, "urn:x");
        assert_eq!(urn.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_templated_links_stay_unexpanded() {
        let builders = LinkBuilders::standard();

        let link = builders
            .build(&LinkData::templated("/widgets{?page,size}"), &NoRoutes)
            .unwrap();
        assert_eq!(link.href, "/widgets{?page,size}");
        assert!(link.templated);

        for malformed in ["/widgets{?page", "/widgets}", "/w{{id}}", "/w/{}"] {
            let error = builders
                .build(&LinkData::templated(malformed), &NoRoutes)
                .unwrap_err();
            assert!(
                matches!(error.current_context(), Error::MalformedTemplate { .. }),
                "{malformed} should be rejected"
            );
        }
    }

    #[test]
    fn test_endpoint_links_resolve_through_routes() {
        let builders = LinkBuilders::standard();
        let routes = RouteTable::new().with_route("widget", "/widgets/{id}");

        let link = builders
            .build(
                &LinkData::endpointed("widget", json!({ "id": 7 })).with_name("seven"),
                &routes,
            )
            .unwrap();
        assert_eq!(link.href, "/widgets/7");
        assert_eq!(link.name.as_deref(), Some("seven"));

        let error = builders
            .build(&LinkData::endpointed("gadget", json!({})), &routes)
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::UnknownRoute { name } if name == "gadget"
        ));
    }

    #[test]
    fn test_missing_builder_is_an_error() {
        let mut builders = LinkBuilders::empty();
        builders.register(LinkKind::Constant, ConstantLinkBuilder);

        let error = builders
            .build(&LinkData::templated("/t{id}"), &NoRoutes)
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::MissingLinkBuilder {
                kind: LinkKind::Templated
            }
        ));
    }
}

//! Descriptions of links before they are resolved
//!
//! A [`LinkData`] says how to build a link; a [`LinkBuilder`](super::LinkBuilder)
//! registered for its [`LinkKind`] turns it into a [`Link`](super::Link).

use serde_json::{Map, Value};
use strum::{AsRefStr, Display};

/// Optional members copied verbatim onto the built link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMetadata {
    /// Media type hint of the target resource
    pub media_type:  Option<String>,
    /// URI describing the deprecation of the link
    pub deprecation: Option<String>,
    /// Secondary key for selecting among links sharing a relation
    pub name:        Option<String>,
    /// URI of a profile of the target resource
    pub profile:     Option<String>,
    /// Human-readable label
    pub title:       Option<String>,
    /// Language of the target resource
    pub href_lang:   Option<String>,
}

/// Where a link points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A fixed URI
    Constant {
        /// Absolute or relative URI
        href: String,
    },
    /// An RFC 6570 URI template, expanded by the client
    Templated {
        /// The template pattern
        template: String,
    },
    /// A named route or endpoint, resolved to a URL at render time
    Endpointed {
        /// Route or endpoint name
        name:   String,
        /// Route parameters
        values: Map<String, Value>,
    },
}

impl LinkTarget {
    /// Variant tag of this target
    pub const fn kind(&self) -> LinkKind {
        match self {
            Self::Constant { .. } => LinkKind::Constant,
            Self::Templated { .. } => LinkKind::Templated,
            Self::Endpointed { .. } => LinkKind::Endpointed,
        }
    }
}

/// Variant tag of a [`LinkTarget`], the key link builders are registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LinkKind {
    /// [`LinkTarget::Constant`]
    Constant,
    /// [`LinkTarget::Templated`]
    Templated,
    /// [`LinkTarget::Endpointed`]
    Endpointed,
}

/// How to build one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkData {
    target:   LinkTarget,
    metadata: LinkMetadata,
}

impl LinkData {
    /// Link to a fixed URI
    pub fn constant(href: impl Into<String>) -> Self {
        Self::from_target(LinkTarget::Constant { href: href.into() })
    }

    /// Link holding a URI template
    pub fn templated(template: impl Into<String>) -> Self {
        Self::from_target(LinkTarget::Templated {
            template: template.into(),
        })
    }

    /// Link to a named route
    ///
    /// `values` is the parameter bag; anything other than a JSON object is treated as
    /// an empty bag.
    pub fn endpointed(name: impl Into<String>, values: Value) -> Self {
        let values = match values {
            Value::Object(values) => values,
            _ => Map::new(),
        };
        Self::from_target(LinkTarget::Endpointed {
            name: name.into(),
            values,
        })
    }

    /// Link with an explicit target and no metadata
    pub fn from_target(target: LinkTarget) -> Self {
        Self {
            target,
            metadata: LinkMetadata::default(),
        }
    }

    /// Set the media type hint
    #[must_use]
    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.metadata.media_type = Some(media_type.into());
        self
    }

    /// Mark the link as deprecated
    #[must_use]
    pub fn with_deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.metadata.deprecation = Some(deprecation.into());
        self
    }

    /// Set the secondary key
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    /// Set the profile URI
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.metadata.profile = Some(profile.into());
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Set the language of the target
    #[must_use]
    pub fn with_href_lang(mut self, href_lang: impl Into<String>) -> Self {
        self.metadata.href_lang = Some(href_lang.into());
        self
    }

    /// Where the link points to
    pub const fn target(&self) -> &LinkTarget {
        &self.target
    }

    /// Optional link members
    pub const fn metadata(&self) -> &LinkMetadata {
        &self.metadata
    }

    /// Variant tag of the target
    pub const fn kind(&self) -> LinkKind {
        self.target.kind()
    }
}

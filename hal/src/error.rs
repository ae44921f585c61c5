use error_stack::Report;
use thiserror::Error;

use crate::link::LinkKind;

// Error message prefix
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `hal_transform` library
pub type Result<T> = core::result::Result<T, Report<Error>>;

/// Errors raised while registering transformations or rendering HAL documents
///
/// Configuration errors (`MalformedSelector`, `DuplicateRegistration`,
/// `MissingLinkBuilder`, `MalformedTemplate`, `Configuration`) surface at startup.
/// The remaining variants abort the rendering of a single document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    /// Configuration could not be loaded or is inconsistent
    Configuration(String),

    #[error("Type already registered: {type_name}")]
    /// A transformation map was registered twice for the same type
    DuplicateRegistration {
        /// Name of the type registered twice
        type_name: String,
    },

    #[error("Malformed selector '{selector}': {reason}")]
    /// A member selector is not a direct member access on its parameter
    MalformedSelector {
        /// The selector as written
        selector: String,
        /// Why it was rejected
        reason:   String,
    },

    #[error("Malformed URI template '{template}': {reason}")]
    /// A templated link does not hold a well-formed URI template
    MalformedTemplate {
        /// The template as written
        template: String,
        /// Why it was rejected
        reason:   String,
    },

    #[error("No link builder registered for {kind} links")]
    /// No builder is registered for the link kind being resolved
    MissingLinkBuilder {
        /// The unhandled link kind
        kind: LinkKind,
    },

    #[error("Serialization failed: {0}")]
    /// A native value could not be serialized to a JSON tree
    Serialization(String),

    #[error("Failed to transform '{type_name}' at {path}")]
    /// Link generation failed while transforming the node at `path`
    Transformation {
        /// JSON path of the node being transformed
        path:      String,
        /// Type registered for that node
        type_name: String,
    },

    #[error("No route named '{name}' could be resolved")]
    /// An endpoint link names a route the URL resolver does not know
    UnknownRoute {
        /// The route or endpoint name
        name: String,
    },
}

impl Error {
    /// Create a "Malformed selector" error
    pub fn malformed_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedSelector {
            selector: selector.to_string(),
            reason:   reason.to_string(),
        }
    }

    /// Create a "Malformed URI template" error
    pub fn malformed_template(template: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedTemplate {
            template: template.to_string(),
            reason:   reason.to_string(),
        }
    }

    /// Create an "Invalid X" configuration error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create an error for a failed serialization of the named type
    pub fn serialization_failed(type_name: &str) -> Self {
        Self::Serialization(format!("could not serialize '{type_name}'"))
    }
}

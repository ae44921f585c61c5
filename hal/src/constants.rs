// ============================================================================
// HAL RESERVED NAMES
// ============================================================================

/// Member holding the link relations of a HAL resource
pub const LINKS_KEY: &str = "_links";

/// Member holding the embedded resources of a HAL resource
pub const EMBEDDED_KEY: &str = "_embedded";

/// Relation of a resource's own link, and of a collection's items when the
/// collection is wrapped
pub const SELF_RELATION: &str = "self";

/// Media type under which transformed documents are served
pub const HAL_MEDIA_TYPE: &str = "application/hal+json";

// ============================================================================
// JSON PATHS
// ============================================================================

/// Root segment of the JSON paths reported in logs and errors
pub(crate) const ROOT_PATH: &str = "$";

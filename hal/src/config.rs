//! Serializer-facing configuration
//!
//! The walker has to agree with the serializer that produced the JSON tree on how
//! dictionary keys were named, otherwise it cannot line native entries up with JSON
//! members. Route templates for [`RouteTable`](crate::RouteTable) live here as well so
//! a service can keep both in one configuration document.

use std::collections::BTreeMap;

use error_stack::ResultExt;
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{Error, Result};

/// Naming transform applied by the serializer to dictionary keys
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyNaming {
    /// Keys are written exactly as the native key renders
    #[default]
    AsIs,
    /// `lowerCamelCase`
    CamelCase,
    /// `UpperCamelCase`
    PascalCase,
    /// `snake_case`
    SnakeCase,
    /// `kebab-case`
    KebabCase,
}

impl KeyNaming {
    /// Apply the naming transform to a native key
    pub fn apply(self, key: &str) -> String {
        match self {
            Self::AsIs => key.to_string(),
            Self::CamelCase => key.to_lower_camel_case(),
            Self::PascalCase => key.to_upper_camel_case(),
            Self::SnakeCase => key.to_snake_case(),
            Self::KebabCase => key.to_kebab_case(),
        }
    }
}

/// Configuration shared by every transformation a repository performs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HalConfig {
    /// How the serializer names dictionary keys
    pub dictionary_key_naming: KeyNaming,
    /// Route name to path template, e.g. `"widget" = "/widgets/{id}"`
    pub routes:                BTreeMap<String, String>,
}

impl HalConfig {
    /// Parse a configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .change_context(Error::invalid("configuration", "unparseable JSON"))
    }
}

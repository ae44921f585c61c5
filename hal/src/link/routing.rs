//! Named route resolution for endpoint links

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::config::HalConfig;

macro_rules! define_regex {
    ($name:ident, $pattern:expr) => {
        #[allow(clippy::unwrap_used, reason = "the fallback pattern is valid")]
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            // This regex pattern is known to be valid at compile time
            Regex::new($pattern).unwrap_or_else(|_| {
                // Fallback regex that matches nothing - should never happen
                Regex::new(r"$^").unwrap()
            })
        });
    };
}

define_regex!(PLACEHOLDER_REGEX, r"\{([A-Za-z_][A-Za-z0-9_]*)\}");

/// Resolves a route name and a parameter bag into a URL
///
/// This is the hosting application's routing layer as seen by endpoint links.
/// Returning `None` means the route does not exist or cannot be built from the given
/// parameters; the link builder reports that as [`Error::UnknownRoute`](crate::Error).
pub trait UrlResolver {
    /// URL for `name` with `values` bound, if the route exists
    fn resolve(&self, name: &str, values: &Map<String, Value>) -> Option<String>;
}

impl<F> UrlResolver for F
where
    F: Fn(&str, &Map<String, Value>) -> Option<String>,
{
    fn resolve(&self, name: &str, values: &Map<String, Value>) -> Option<String> {
        self(name, values)
    }
}

/// Resolver that knows no routes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRoutes;

impl UrlResolver for NoRoutes {
    fn resolve(&self, _name: &str, _values: &Map<String, Value>) -> Option<String> {
        None
    }
}

/// Route names mapped to path templates such as `/widgets/{id}`
///
/// Placeholders are filled from the parameter bag. Parameters not consumed by a
/// placeholder are appended as a query string, in bag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    /// Table without routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded from the `routes` section of a configuration
    pub fn from_config(config: &HalConfig) -> Self {
        Self {
            routes: config.routes.clone(),
        }
    }

    /// Add or replace a route
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(name.into(), template.into());
        self
    }

    /// Path template registered under `name`
    pub fn template(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }
}

impl UrlResolver for RouteTable {
    fn resolve(&self, name: &str, values: &Map<String, Value>) -> Option<String> {
        let template = self.template(name)?;

        let mut consumed = Vec::new();
        let mut missing = None;
        let path = PLACEHOLDER_REGEX.replace_all(template, |captures: &Captures<'_>| {
            let parameter = &captures[1];
            match values.get(parameter).and_then(render_parameter) {
                Some(rendered) => {
                    consumed.push(parameter.to_string());
                    rendered
                }
                None => {
                    missing.get_or_insert_with(|| parameter.to_string());
                    String::new()
                }
            }
        });

        if let Some(parameter) = missing {
            tracing::debug!(route = name, parameter, "route parameter has no value");
            return None;
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in values {
            if consumed.contains(key) {
                continue;
            }
            if let Some(rendered) = render_parameter(value) {
                query.append_pair(key, &rendered);
                has_query = true;
            }
        }

        if has_query {
            Some(format!("{path}?{}", query.finish()))
        } else {
            Some(path.into_owned())
        }
    }
}

/// Text form of a route parameter; null and structured values have none
fn render_parameter(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

//! Position of the node being visited
//!
//! Carries the JSON path from the document root so logs and errors can name the node
//! where something went wrong.

use std::fmt;

use crate::constants::{EMBEDDED_KEY, ROOT_PATH};

/// How the current node was reached from its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A member of an object, by serialized name
    Member(String),
    /// An element of an array
    Element(usize),
    /// An entry of a dictionary, by serialized key
    Entry(String),
    /// A value embedded under a relation
    Embedded(String),
}

/// Context of one node in the walk
#[derive(Debug, Clone)]
pub struct VisitContext {
    /// Accumulated path from the root, e.g. `$.parts[0]`
    pub path:  String,
    /// Number of levels below the root
    pub depth: usize,
}

impl VisitContext {
    /// Context of the document root
    pub fn root() -> Self {
        Self {
            path:  ROOT_PATH.to_string(),
            depth: 0,
        }
    }

    /// Generate the path suffix for a segment
    fn segment_to_path(segment: &PathSegment) -> String {
        match segment {
            PathSegment::Member(name) => format!(".{name}"),
            PathSegment::Element(index) => format!("[{index}]"),
            PathSegment::Entry(key) => format!("[\"{key}\"]"),
            PathSegment::Embedded(relation) => format!(".{EMBEDDED_KEY}.{relation}"),
        }
    }

    /// Create the context of a child node
    pub fn child(&self, segment: &PathSegment) -> Self {
        Self {
            path:  format!("{}{}", self.path, Self::segment_to_path(segment)),
            depth: self.depth + 1,
        }
    }

    /// Context of an object member
    pub fn member(&self, name: &str) -> Self {
        self.child(&PathSegment::Member(name.to_string()))
    }

    /// Context of an array element
    pub fn element(&self, index: usize) -> Self {
        self.child(&PathSegment::Element(index))
    }

    /// Context of a dictionary entry
    pub fn entry(&self, key: &str) -> Self {
        self.child(&PathSegment::Entry(key.to_string()))
    }

    /// Context of an embedded value
    pub fn embedded(&self, relation: &str) -> Self {
        self.child(&PathSegment::Embedded(relation.to_string()))
    }
}

impl fmt::Display for VisitContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_accumulate() {
        let root = VisitContext::root();
        let part = root.member("parts").element(2);
        let entry = part.entry("gear box").embedded("up");

        assert_eq!(root.to_string(), "$");
        assert_eq!(part.path, "$.parts[2]");
        assert_eq!(part.depth, 2);
        assert_eq!(entry.path, "$.parts[2][\"gear box\"]._embedded.up");
        assert_eq!(entry.depth, 4);
    }
}

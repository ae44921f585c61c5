//! HAL+JSON transformation of serialized object graphs
//!
//! This crate turns the plain JSON a serializer produced for a value into a HAL
//! document: registered types gain `_links` and `_embedded` members, collections are
//! wrapped so they can carry links, and members can be embedded, hoisted or ignored.
//! Types without a registration are written exactly as the serializer wrote them.
//!
//! # Usage
//!
//! ```
//! use hal_transform::{HalContract, LinkData, Repository, RouteTable, TransformationMap, Walker};
//! use serde::Serialize;
//! use serde_json::json;
//!
//! #[derive(Serialize, HalContract)]
//! #[serde(rename_all = "PascalCase")]
//! struct Widget {
//!     id:   u32,
//!     name: String,
//! }
//!
//! let repository = Repository::builder()
//!     .register(TransformationMap::new(|w: &Widget| {
//!         Some(LinkData::endpointed("widget", json!({ "id": w.id })))
//!     }))?
//!     .build();
//! let routes = RouteTable::new().with_route("widget", "/widgets/{id}");
//!
//! let widget = Widget { id: 1, name: "gear".to_string() };
//! let document = Walker::new(&repository, &routes).transform(&widget)?;
//! assert_eq!(
//!     document,
//!     json!({ "Id": 1, "Name": "gear", "_links": { "self": { "href": "/widgets/1" } } })
//! );
//! # Ok::<(), error_stack::Report<hal_transform::Error>>(())
//! ```
//!
//! # Pieces
//!
//! - [`HalContract`] describes how a native type is shaped once serialized; derive it
//!   with `#[derive(HalContract)]` (default `derive` feature)
//! - [`TransformationMap`] builds the rules of one type; [`Repository`] holds them
//! - [`Walker`] applies them to a value and its JSON
//! - [`LinkData`] describes a link; [`LinkBuilders`] and a [`UrlResolver`] turn it into
//!   a [`Link`]

mod config;
mod constants;
mod contract;
mod error;
mod instruction;
mod link;
mod repository;
mod transformation_map;
mod transformer;
mod type_key;
mod walker;

#[cfg(test)]
mod test_support;

pub use config::{HalConfig, KeyNaming};
pub use constants::{EMBEDDED_KEY, HAL_MEDIA_TYPE, LINKS_KEY, SELF_RELATION};
pub use contract::{
    Contract, HalContract, Member, Resource, ShapeKind, elements, member_value, resolve,
};
pub use error::{Error, Result};
#[cfg(feature = "derive")]
pub use hal_transform_macros::HalContract;
pub use instruction::{
    ElementLinkInstruction, EmbedIndex, EmbedInstruction, HoistInstruction, LinkInstruction,
    ManyLinkInstruction, MemberName, SingleLinkInstruction, TransformationInstructions,
};
pub use link::{
    ConstantLinkBuilder, EndpointLinkBuilder, Link, LinkBuilder, LinkBuilders, LinkCollection,
    LinkData, LinkKey, LinkKind, LinkMap, LinkMetadata, LinkTarget, NoRoutes, RouteTable,
    TemplatedLinkBuilder, UrlResolver,
};
pub use repository::{HalProfile, Repository, RepositoryBuilder};
pub use transformation_map::TransformationMap;
pub use transformer::TypeTransformer;
pub use type_key::TypeKey;
pub use walker::Walker;

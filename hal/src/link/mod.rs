//! Links: how they are described, built, grouped and written

mod builder;
mod data;
mod hal_link;
mod routing;

pub use builder::{
    ConstantLinkBuilder, EndpointLinkBuilder, LinkBuilder, LinkBuilders, TemplatedLinkBuilder,
};
pub use data::{LinkData, LinkKind, LinkMetadata, LinkTarget};
pub use hal_link::{Link, LinkCollection, LinkKey, LinkMap};
pub use routing::{NoRoutes, RouteTable, UrlResolver};

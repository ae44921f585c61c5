//! Registry of transformation rules, built once at startup
//!
//! Lookups match the exact runtime type of a value. A type without registration is
//! never an error: the walker leaves values of that type as the serializer wrote them.

use std::collections::HashMap;

use error_stack::Report;

use crate::config::HalConfig;
use crate::contract::Resource;
use crate::error::{Error, Result};
use crate::instruction::TransformationInstructions;
use crate::link::{LinkBuilder, LinkBuilders, LinkKind, UrlResolver};
use crate::transformation_map::TransformationMap;
use crate::transformer::TypeTransformer;
use crate::type_key::TypeKey;

/// A set of registrations applied together, typically one per API area
pub trait HalProfile {
    /// Register this profile's transformation maps
    fn register(&self, repository: RepositoryBuilder) -> Result<RepositoryBuilder>;
}

/// Immutable mapping from native type to transformation rules
///
/// Shared read-only between concurrent requests, e.g. behind an `Arc`.
#[derive(Debug)]
pub struct Repository {
    instructions:  HashMap<TypeKey, TransformationInstructions>,
    link_builders: LinkBuilders,
    config:        HalConfig,
}

impl Repository {
    /// Start building a repository with the standard link builders
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::default()
    }

    /// Whether rules are registered for exactly this type
    pub fn can_transform(&self, type_key: TypeKey) -> bool {
        self.instructions.contains_key(&type_key)
    }

    /// Whether rules are registered for exactly `T`
    pub fn can_transform_type<T: Resource>(&self) -> bool {
        self.can_transform(TypeKey::of::<T>())
    }

    /// Transformer for this type, resolving endpoint links through `urls`
    pub fn try_get_transformer<'a>(
        &'a self,
        type_key: TypeKey,
        urls: &'a dyn UrlResolver,
    ) -> Option<TypeTransformer<'a>> {
        self.instructions
            .get(&type_key)
            .map(|instructions| TypeTransformer::new(instructions, &self.link_builders, urls))
    }

    /// Configuration shared by every transformation
    pub const fn config(&self) -> &HalConfig {
        &self.config
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Collects registrations into a [`Repository`]
#[derive(Debug, Default)]
pub struct RepositoryBuilder {
    instructions:  HashMap<TypeKey, TransformationInstructions>,
    link_builders: LinkBuilders,
    config:        HalConfig,
}

impl RepositoryBuilder {
    /// Register the rules of `T`
    ///
    /// Registering the same type twice is a configuration error.
    pub fn register<T: Resource>(self, map: TransformationMap<T>) -> Result<Self> {
        self.register_instructions(map.build())
    }

    /// Register already built rules
    pub fn register_instructions(
        mut self,
        instructions: TransformationInstructions,
    ) -> Result<Self> {
        let type_key = instructions.type_key();
        if self.instructions.contains_key(&type_key) {
            return Err(Report::new(Error::DuplicateRegistration {
                type_name: type_key.name().to_string(),
            }));
        }

        tracing::debug!(
            type_name = %type_key.short_name(),
            embeds = instructions.embeds().len(),
            hoists = instructions.hoists().len(),
            ignores = instructions.ignores().len(),
            "registered transformation"
        );
        self.instructions.insert(type_key, instructions);
        Ok(self)
    }

    /// Apply every registration of a profile
    pub fn profile(self, profile: &impl HalProfile) -> Result<Self> {
        profile.register(self)
    }

    /// Add or replace the builder for one link kind
    #[must_use]
    pub fn link_builder(mut self, kind: LinkKind, builder: impl LinkBuilder + 'static) -> Self {
        self.link_builders.register(kind, builder);
        self
    }

    /// Use `config` for every transformation
    #[must_use]
    pub fn config(mut self, config: HalConfig) -> Self {
        self.config = config;
        self
    }

    /// Freeze the registrations
    pub fn build(self) -> Repository {
        Repository {
            instructions:  self.instructions,
            link_builders: self.link_builders,
            config:        self.config,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::link::{Link, LinkData, NoRoutes};

    struct Counters;

    impl HalProfile for Counters {
        fn register(&self, repository: RepositoryBuilder) -> Result<RepositoryBuilder> {
            repository
                .register(TransformationMap::new(|count: &u32| {
                    Some(LinkData::constant(format!("/counts/{count}")))
                }))?
                .register(TransformationMap::new(|_: &Vec<u32>| {
                    Some(LinkData::constant("/counts"))
                }))
        }
    }

    struct Shouting;

    impl LinkBuilder for Shouting {
        fn build(&self, _data: &LinkData, _urls: &dyn UrlResolver) -> Result<Link> {
            Ok(Link::new("/LOUD", false, &crate::link::LinkMetadata::default()))
        }
    }

    #[test]
    fn test_exact_type_lookup() {
        let repository = Repository::builder().profile(&Counters).unwrap().build();

        assert_eq!(repository.len(), 2);
        assert!(repository.can_transform_type::<u32>());
        assert!(repository.can_transform_type::<Vec<u32>>());
        assert!(!repository.can_transform_type::<u64>());
        assert!(!repository.can_transform_type::<Option<u32>>());
        assert!(
            repository
                .try_get_transformer(TypeKey::of::<u64>(), &NoRoutes)
                .is_none()
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let error = Repository::builder()
            .profile(&Counters)
            .unwrap()
            .register(TransformationMap::new(|_: &u32| None))
            .unwrap_err();

        assert!(matches!(
            error.current_context(),
            Error::DuplicateRegistration { type_name } if type_name == "u32"
        ));
    }

    #[test]
    fn test_link_builder_replacement() {
        let repository = Repository::builder()
            .profile(&Counters)
            .unwrap()
            .link_builder(LinkKind::Constant, Shouting)
            .build();

        let transformer = repository
            .try_get_transformer(TypeKey::of::<u32>(), &NoRoutes)
            .expect("u32 is registered");
        let links = transformer.generate_links(&5_u32).unwrap();
        let own = links.get("self", true).expect("self link");

        assert_eq!(own.links()[0].href, "/LOUD");
    }

    #[test]
    fn test_repository_is_shareable() {
        let repository = Arc::new(Repository::builder().profile(&Counters).unwrap().build());

        let handles: Vec<_> = (0..4_u32)
            .map(|count| {
                let repository = Arc::clone(&repository);
                std::thread::spawn(move || {
                    let transformer = repository
                        .try_get_transformer(TypeKey::of::<u32>(), &NoRoutes)
                        .expect("u32 is registered");
                    transformer.generate_links(&count).unwrap()
                })
            })
            .collect();

        for (count, handle) in handles.into_iter().enumerate() {
            let links = handle.join().unwrap();
            let own = links.get("self", true).expect("self link");
            assert_eq!(own.links()[0].href, format!("/counts/{count}"));
        }
    }
}

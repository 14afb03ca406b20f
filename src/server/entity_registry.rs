//! Entity registry for managing route descriptors and generating listing routes

use super::handlers::{ListState, list_entities};
use crate::config::PaginationConfig;
use crate::core::entity::Entity;
use crate::storage::EntityRepository;
use axum::Router;
use axum::routing::get;
use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Trait that describes how to build routes for an entity
pub trait RouteDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "person")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "people")
    fn plural(&self) -> &str;

    /// Build the routes for this entity, with state attached
    ///
    /// Should return a Router with routes like:
    /// - GET /{plural}
    fn build_routes(&self, pagination: &PaginationConfig) -> Router;
}

/// Listing routes of one entity type over its repository
pub struct EntityRoutes<E: Entity> {
    repository: Arc<dyn EntityRepository<E>>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityRoutes<E> {
    pub fn new(repository: Arc<dyn EntityRepository<E>>) -> Self {
        Self {
            repository,
            _marker: PhantomData,
        }
    }
}

impl<E: Entity + Serialize> RouteDescriptor for EntityRoutes<E> {
    fn entity_type(&self) -> &str {
        E::resource_name_singular()
    }

    fn plural(&self) -> &str {
        E::resource_name()
    }

    fn build_routes(&self, pagination: &PaginationConfig) -> Router {
        let state = ListState {
            repository: self.repository.clone(),
            pagination: pagination.clone(),
        };
        Router::new()
            .route(&format!("/{}", E::resource_name()), get(list_entities::<E>))
            .with_state(state)
    }
}

/// Registry for all entities in the application
///
/// This registry collects route descriptors and can generate a router with
/// all listing routes.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<String, Box<dyn RouteDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a route descriptor
    ///
    /// The entity type name will be used as the key; registering the same
    /// entity type again replaces the previous descriptor.
    pub fn register(&mut self, descriptor: Box<dyn RouteDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    ///
    /// This merges all entity routes into a single router.
    pub fn build_routes(&self, pagination: &PaginationConfig) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(pagination));
        }

        router
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

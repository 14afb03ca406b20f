//! Storage executors for compiled queries
//!
//! Every backend implements [`EntityRepository`]: it takes the form of a
//! [`CompiledQuery`] its storage family understands together with a
//! [`PageSpec`] and returns one [`Page`] of entities.
//!
//! Backends agree on the following semantics:
//! - a missing or null field never satisfies a comparison, `NE` included
//! - text compares and sorts by byte order
//! - null sorts last ascending and first descending
//! - rows equal on every sort key are ordered by id
//!
//! PostgreSQL keeps date-times to the microsecond. Stored instants are
//! truncated to that precision before comparison, so a value differing from a
//! filter bound by less than a microsecond may compare as equal there while the
//! in-memory and MongoDB executors see the full nanoseconds.

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
#[cfg(feature = "postgres")]
pub mod postgres;

use crate::core::entity::Entity;
use crate::core::error::QueryResult;
use crate::core::query::Page;
use crate::query::compiler::CompiledQuery;
use crate::query::page::PageSpec;
use async_trait::async_trait;

pub use in_memory::InMemoryRepository;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoRepository;
#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;

/// Storage executor for one entity type
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;

    /// Insert or replace an entity
    async fn save(&self, entity: E) -> QueryResult<E>;

    /// Fetch one page of the entities matching `query`, ordered per `page`
    ///
    /// Fails with a validation error when a sort field is not a queryable
    /// field of `E`.
    async fn execute(&self, query: &CompiledQuery, page: &PageSpec) -> QueryResult<Page<E>>;
}

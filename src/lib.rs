//! # This-Query
//!
//! A dynamic filter and page compiler for multi-entity REST APIs in Rust.
//!
//! ## Features
//!
//! - **Typed Filters**: Untyped `(field, value, operator)` triples are resolved
//!   against a per-entity field table and coerced into typed conditions
//! - **Two Outputs**: The same conditions compile to a relational
//!   specification (parameterized SQL) and to a generic predicate tree
//! - **Error Accumulation**: Every invalid condition is reported at once
//! - **Paging**: Zero-based page index, size, multi-field sort with direction
//! - **Pluggable Storage**: In-memory, PostgreSQL and MongoDB repositories
//!   with identical filter, null and ordering semantics
//! - **REST Exposure**: `GET /{plural}` listing routes built with axum
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_query::prelude::*;
//!
//! impl_queryable_entity!(Book, "book", "books", {
//!     title: String => FieldType::Text,
//!     pages: i64 => FieldType::Integer,
//! });
//!
//! let filters = vec![
//!     FilterDescriptor::new("title", "Rust", Operator::Like),
//!     FilterDescriptor::new("pages", "100", Operator::Gt),
//! ];
//! let query = FilterCompiler::for_entity::<Book>().compile(Some(filters.as_slice()))?;
//!
//! let app = ServerBuilder::new()
//!     .register::<Book>(InMemoryRepository::new())
//!     .build();
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod query;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::Entity,
        error::{ConfigError, FilterError, QueryError, QueryResult, StorageError, ValidationError},
        field::{EntityDescriptor, FieldDescriptor, FieldType, FieldValue, IntoFieldValue},
        operator::Operator,
        query::{Page, PaginatedResponse, PaginationMeta, QueryParams},
    };

    // === Query compilation ===
    pub use crate::query::{
        CompiledQuery, Direction, FilterCompiler, FilterDescriptor, GenericPredicateBuilder,
        PageSpec, Placeholder, Predicate, PredicateBuilder, SortOrder, Specification,
        SpecificationBuilder, SqlFragment, TypedCondition, assemble,
    };

    // === Macros ===
    pub use crate::{impl_field_enum, impl_queryable_entity};

    // === Storage ===
    pub use crate::storage::{EntityRepository, InMemoryRepository};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoRepository;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresRepository;

    // === Config ===
    pub use crate::config::{LoggingConfig, PaginationConfig, QueryConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{EntityRegistry, RouteDescriptor, ServerBuilder, init_tracing};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{Router, routing::get};
}

//! Core module containing fundamental traits and types for the framework

pub mod coerce;
pub mod entity;
pub mod error;
pub mod field;
pub mod operator;
pub mod query;

pub use coerce::{CoercionError, coerce, coerce_field};
pub use entity::Entity;
pub use error::{
    ConfigError, FilterError, QueryError, QueryResult, StorageError, ValidationError,
};
pub use field::{EntityDescriptor, FieldDescriptor, FieldType, FieldValue, IntoFieldValue};
pub use operator::Operator;
pub use query::{Page, PaginatedResponse, PaginationMeta, QueryParams};

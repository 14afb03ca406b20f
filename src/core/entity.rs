//! Entity trait defining the queryable abstraction for all domain types

use crate::core::field::{EntityDescriptor, FieldValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all queryable entities.
///
/// Every entity has:
/// - id: Unique identifier (the identity field, exposed as text)
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// plus a static [`EntityDescriptor`] naming every field a caller may filter
/// or sort on. Entities are usually declared with `impl_queryable_entity!`,
/// which builds the descriptor once and generates `field_value`.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs and collection names (e.g., "people")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "person")
    fn resource_name_singular() -> &'static str;

    /// The field-descriptor table of this entity type, built once
    fn descriptor() -> &'static EntityDescriptor;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a queryable field by name
    ///
    /// Returns `None` for names outside the descriptor table and
    /// `Some(FieldValue::Null)` for unset optional fields.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

//! Field metadata, typed field values and the per-entity descriptor table

use crate::core::error::FilterError;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// The runtime type of a queryable entity field
///
/// Enumerated fields carry the exact constant names they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Decimal,
    Boolean,
    Enum(&'static [&'static str]),
    Date,
    DateTime,
}

impl FieldType {
    /// Short type name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Integer => "Integer",
            FieldType::Decimal => "Decimal",
            FieldType::Boolean => "Boolean",
            FieldType::Enum(_) => "Enum",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
        }
    }

    /// Whether values of this type have a meaningful ordering (numbers and dates)
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            FieldType::Integer | FieldType::Decimal | FieldType::Date | FieldType::DateTime
        )
    }

    /// Whether values of this type support substring matching
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Text)
    }

    /// Check that a typed value has the value form of this type
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (_, FieldValue::Null)
                | (FieldType::Text, FieldValue::String(_))
                | (FieldType::Integer, FieldValue::Integer(_))
                | (FieldType::Decimal, FieldValue::Float(_))
                | (FieldType::Boolean, FieldValue::Boolean(_))
                | (FieldType::Enum(_), FieldValue::Enum(_))
                | (FieldType::Date, FieldValue::Date(_))
                | (FieldType::DateTime, FieldValue::DateTime(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed field value
///
/// Produced by coercing caller input against a [`FieldType`], and by
/// entities when exposing their own fields for in-process evaluation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Enum(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible (text and enum constants)
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two values of the same form
    ///
    /// Returns `None` when either side is null or the forms differ. Integers
    /// and floats compare numerically with each other.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b))
            | (FieldValue::Enum(a), FieldValue::Enum(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Enum(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

/// Conversion of entity field types into [`FieldValue`]
///
/// Implemented for every Rust type the entity macros accept as a queryable field.
pub trait IntoFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl IntoFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl IntoFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl IntoFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl IntoFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl IntoFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl IntoFieldValue for NaiveDate {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl IntoFieldValue for Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// A single queryable field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
}

/// Static field-metadata table of one entity type
///
/// Built once per entity (see [`impl_queryable_entity!`](crate::impl_queryable_entity))
/// and shared read-only afterwards. Lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    entity: &'static str,
    identity: &'static str,
    fields: IndexMap<&'static str, FieldDescriptor>,
}

impl EntityDescriptor {
    /// Start a descriptor for `entity` whose identity field is `identity`
    pub fn builder(entity: &'static str, identity: &'static str) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder {
            descriptor: EntityDescriptor {
                entity,
                identity,
                fields: IndexMap::new(),
            },
        }
    }

    /// The singular entity type name
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Name of the identity field (default sort key)
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// Resolve a field name to its runtime type
    pub fn resolve(&self, field: &str) -> Result<FieldType, FilterError> {
        self.fields
            .get(field)
            .map(|descriptor| descriptor.field_type)
            .ok_or_else(|| FilterError::UnknownField {
                entity: self.entity.to_string(),
                field: field.to_string(),
            })
    }

    /// Look up a field descriptor by name
    pub fn field(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    /// Whether the entity exposes a queryable field with this name
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All queryable fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }
}

/// Builder for [`EntityDescriptor`]
pub struct EntityDescriptorBuilder {
    descriptor: EntityDescriptor,
}

impl EntityDescriptorBuilder {
    /// Declare a queryable field; a repeated name replaces the earlier declaration
    pub fn field(mut self, name: &'static str, field_type: FieldType) -> Self {
        self.descriptor
            .fields
            .insert(name, FieldDescriptor { name, field_type });
        self
    }

    pub fn build(self) -> EntityDescriptor {
        self.descriptor
    }
}

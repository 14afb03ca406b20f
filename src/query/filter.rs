//! Filter descriptors supplied by callers and their compiled form

use crate::core::field::{FieldType, FieldValue};
use crate::core::operator::Operator;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One caller-supplied match condition
///
/// # Wire format
///
/// ```json
/// {"field": "birthday", "value": "2010-11-23", "operator": "NE"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilterDescriptor {
    /// Name of the entity field, matched exactly
    #[validate(length(min = 1, max = 255))]
    pub field: String,

    /// Raw value, coerced to the field's type at compile time
    pub value: String,

    pub operator: Operator,
}

impl FilterDescriptor {
    pub fn new(field: impl Into<String>, value: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
        }
    }
}

/// A type-checked filter condition
///
/// Only the compiler creates these: the field is known to the entity, the
/// value has the field's value form and the operator is legal for the type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCondition {
    field: String,
    field_type: FieldType,
    operator: Operator,
    value: FieldValue,
}

impl TypedCondition {
    pub(crate) fn new(
        field: impl Into<String>,
        field_type: FieldType,
        operator: Operator,
        value: FieldValue,
    ) -> Self {
        Self {
            field: field.into(),
            field_type,
            operator,
            value,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

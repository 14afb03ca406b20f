//! Filter operators and the operator/type compatibility table

use crate::core::error::FilterError;
use crate::core::field::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison requested by a filter descriptor
///
/// Serialized with the wire names `EQ`, `NE`, `GT`, `GET`, `LT`, `LET`,
/// `LIKE`, `STARTS_WITH` and `ENDS_WITH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Get,
    /// Less than
    Lt,
    /// Less than or equal
    Let,
    /// Substring containment
    Like,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Get,
        Operator::Lt,
        Operator::Let,
        Operator::Like,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Gt => "GT",
            Operator::Get => "GET",
            Operator::Lt => "LT",
            Operator::Let => "LET",
            Operator::Like => "LIKE",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
        }
    }

    /// Whether the operator is an ordered comparison (GT, GET, LT, LET)
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Get | Operator::Lt | Operator::Let
        )
    }

    /// Whether the operator is a substring match (LIKE, STARTS_WITH, ENDS_WITH)
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Operator::Like | Operator::StartsWith | Operator::EndsWith
        )
    }

    /// Whether this operator may be applied to a field of `field_type`
    ///
    /// EQ and NE apply to every type, ordered comparisons only to numbers and
    /// dates, substring matches only to text.
    pub fn supports(&self, field_type: FieldType) -> bool {
        if self.is_ordering() {
            field_type.is_ordered()
        } else if self.is_textual() {
            field_type.is_textual()
        } else {
            true
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operator: {}", s))
    }
}

/// Reject an operator that is not legal for the field's type
pub fn validate(field: &str, operator: Operator, field_type: FieldType) -> Result<(), FilterError> {
    if operator.supports(field_type) {
        Ok(())
    } else {
        Err(FilterError::UnsupportedOperator {
            field: field.to_string(),
            operator,
            field_type: field_type.name(),
        })
    }
}

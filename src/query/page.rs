//! Page and sort assembly

use crate::core::error::{FilterError, ValidationError};
use crate::core::field::EntityDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction, `ASC` or `DESC` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Normalized pagination and ordering of one listing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    page_index: u64,
    page_size: u64,
    orders: Vec<SortOrder>,
}

impl PageSpec {
    /// Zero-based page index
    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Ordering keys, most significant first (never empty)
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Check that every ordering key is a queryable field of the entity
    pub fn validate_sort(&self, descriptor: &EntityDescriptor) -> Result<(), ValidationError> {
        let errors: Vec<FilterError> = self
            .orders
            .iter()
            .filter_map(|order| descriptor.resolve(&order.field).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

/// Build a [`PageSpec`]
///
/// Without sort fields the order is a single ascending sort on the entity's
/// identity field and `direction` is ignored. With sort fields every field is
/// used in the given order, all sharing `direction` (ascending when absent).
pub fn assemble(
    descriptor: &EntityDescriptor,
    page_index: i64,
    page_size: i64,
    direction: Option<Direction>,
    sort_fields: Option<&[String]>,
) -> Result<PageSpec, ValidationError> {
    if page_index < 0 || page_size < 1 {
        let reason = if page_index < 0 {
            "page index must be >= 0"
        } else {
            "page size must be >= 1"
        };
        return Err(ValidationError::InvalidPage {
            page_index,
            page_size,
            reason: reason.to_string(),
        });
    }

    let orders = match sort_fields {
        Some(fields) if !fields.is_empty() => {
            let direction = direction.unwrap_or_default();
            fields
                .iter()
                .map(|field| SortOrder::new(field.clone(), direction))
                .collect()
        }
        _ => vec![SortOrder::new(descriptor.identity(), Direction::Asc)],
    };

    Ok(PageSpec {
        page_index: page_index as u64,
        page_size: page_size as u64,
        orders,
    })
}

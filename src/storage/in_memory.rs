//! In-memory implementation of EntityRepository for testing and development

use crate::core::entity::Entity;
use crate::core::error::{QueryResult, StorageError};
use crate::core::field::FieldValue;
use crate::core::query::Page;
use crate::query::compiler::CompiledQuery;
use crate::query::page::{Direction, PageSpec, SortOrder};
use crate::storage::EntityRepository;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory entity repository
///
/// Evaluates the generic predicate form in process. Useful for testing and
/// development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryRepository<E> {
    entities: Arc<RwLock<HashMap<Uuid, E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository holding `entities`
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        Self {
            entities: Arc::new(RwLock::new(
                entities.into_iter().map(|e| (e.id(), e)).collect(),
            )),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> QueryResult<usize> {
        let entities = self.entities.read().map_err(|e| StorageError::Poisoned {
            message: format!("Failed to acquire read lock: {}", e),
        })?;
        Ok(entities.len())
    }

    pub fn is_empty(&self) -> QueryResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    fn backend(&self) -> &'static str {
        "in-memory"
    }

    async fn save(&self, entity: E) -> QueryResult<E> {
        let mut entities = self.entities.write().map_err(|e| StorageError::Poisoned {
            message: format!("Failed to acquire write lock: {}", e),
        })?;

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn execute(&self, query: &CompiledQuery, page: &PageSpec) -> QueryResult<Page<E>> {
        page.validate_sort(E::descriptor())?;

        let mut matched: Vec<E> = {
            let entities = self.entities.read().map_err(|e| StorageError::Poisoned {
                message: format!("Failed to acquire read lock: {}", e),
            })?;
            entities
                .values()
                .filter(|entity| query.predicate.matches(*entity))
                .cloned()
                .collect()
        };

        matched.sort_by(|a, b| compare_entities(a, b, page.orders()));

        let total = matched.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
        let content = matched.into_iter().skip(offset).take(size).collect();

        tracing::debug!(
            entity = E::resource_name_singular(),
            total,
            page = page.page_index(),
            "executed in-memory query"
        );

        Ok(Page {
            content,
            total,
            page_index: page.page_index(),
            page_size: page.page_size(),
        })
    }
}

/// Order two entities by `orders`, then by id
pub fn compare_entities<E: Entity>(a: &E, b: &E, orders: &[SortOrder]) -> Ordering {
    for order in orders {
        let left = a.field_value(&order.field).unwrap_or(FieldValue::Null);
        let right = b.field_value(&order.field).unwrap_or(FieldValue::Null);

        // null is the greatest value: last ascending, first descending
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => left.compare(&right).unwrap_or(Ordering::Equal),
        };
        let ordering = match order.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id().cmp(&b.id())
}

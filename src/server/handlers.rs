//! HTTP handlers of the listing exposure

use crate::config::PaginationConfig;
use crate::core::entity::Entity;
use crate::core::error::{QueryError, QueryResult, ValidationError};
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::query::compiler::FilterCompiler;
use crate::query::page::assemble;
use crate::storage::EntityRepository;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state of one entity's listing route
pub struct ListState<E: Entity> {
    pub repository: Arc<dyn EntityRepository<E>>,
    pub pagination: PaginationConfig,
}

impl<E: Entity> Clone for ListState<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            pagination: self.pagination.clone(),
        }
    }
}

/// Compile the request and execute it against the repository
///
/// Validation happens before any storage access: page bounds, filter JSON,
/// then every filter condition at once.
pub async fn list<E: Entity>(
    repository: &dyn EntityRepository<E>,
    pagination: &PaginationConfig,
    params: &QueryParams,
) -> QueryResult<PaginatedResponse<E>> {
    let page_size = params.size_or(pagination.default_page_size);
    if page_size > pagination.max_page_size {
        return Err(ValidationError::InvalidPage {
            page_index: params.page,
            page_size,
            reason: format!("page size must be <= {}", pagination.max_page_size),
        }
        .into());
    }

    let descriptor = E::descriptor();
    let sort_fields = params.sort_fields();
    let page = assemble(
        descriptor,
        params.page,
        page_size,
        params.direction,
        sort_fields.as_deref(),
    )?;

    let filters = params.filters()?;
    let query = FilterCompiler::new(descriptor).compile(filters.as_deref())?;

    let result = repository.execute(&query, &page).await?;
    tracing::debug!(
        entity = descriptor.entity(),
        backend = repository.backend(),
        total = result.total,
        "listed entities"
    );
    Ok(result.into())
}

/// `GET /{resource}`
///
/// Query strings that do not deserialize are reported as `INVALID_QUERY`.
pub async fn list_entities<E: Entity + Serialize>(
    State(state): State<ListState<E>>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<E>>, QueryError> {
    let Query(params) = params.map_err(|rejection| ValidationError::InvalidQuery {
        message: rejection.body_text(),
    })?;
    let response = list(state.repository.as_ref(), &state.pagination, &params).await?;
    Ok(Json(response))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

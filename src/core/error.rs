//! Typed error handling for the query compiler and its executors
//!
//! # Error Categories
//!
//! - [`FilterError`]: one invalid filter condition (unknown field, bad value, bad operator)
//! - [`ValidationError`]: a caller-input failure, carrying every field error at once
//! - [`StorageError`]: failures of a storage backend while executing a query
//! - [`ConfigError`]: configuration parsing and validation
//!
//! [`QueryError`] wraps all of them and knows how to render itself as an HTTP response.
//!
//! # Example
//!
//! ```rust,ignore
//! match compiler.compile(Some(&filters)) {
//!     Ok(query) => repository.execute(&query, &page).await,
//!     Err(ValidationError::FieldErrors(errors)) => {
//!         for error in &errors {
//!             println!("{}: {}", error.field(), error);
//!         }
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::operator::Operator;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum QueryError {
    /// Caller-input errors (filters, paging, malformed parameters)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl QueryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::Validation(_) => StatusCode::BAD_REQUEST,
            QueryError::Storage(_) | QueryError::Config(_) | QueryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::Validation(e) => e.error_code(),
            QueryError::Storage(_) => "STORAGE_ERROR",
            QueryError::Config(_) => "CONFIG_ERROR",
            QueryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            QueryError::Validation(ValidationError::FieldErrors(errors)) => {
                let fields: Vec<FieldValidationError> =
                    errors.iter().map(FieldValidationError::from).collect();
                Some(serde_json::json!({ "fields": fields }))
            }
            QueryError::Validation(ValidationError::InvalidPage {
                page_index,
                page_size,
                ..
            }) => Some(serde_json::json!({
                "page": page_index,
                "size": page_size
            })),
            _ => None,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Filter Errors
// =============================================================================

/// A single invalid filter condition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The entity does not expose a queryable field with this name
    #[error("Unknown field '{field}' for entity '{entity}'")]
    UnknownField { entity: String, field: String },

    /// The raw value does not parse to the field's type
    #[error("Invalid value '{value}' for field '{field}': expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// The operator cannot be applied to the field's type
    #[error("Operator {operator} is not supported for field '{field}' of type {field_type}")]
    UnsupportedOperator {
        field: String,
        operator: Operator,
        field_type: &'static str,
    },
}

impl FilterError {
    /// The field the error is about
    pub fn field(&self) -> &str {
        match self {
            FilterError::UnknownField { field, .. }
            | FilterError::InvalidValue { field, .. }
            | FilterError::UnsupportedOperator { field, .. } => field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FilterError::UnknownField { .. } => "UNKNOWN_FIELD",
            FilterError::InvalidValue { .. } => "INVALID_VALUE",
            FilterError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to caller input
///
/// All variants are recoverable and never transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more invalid filter conditions, in descriptor order
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FilterError>),

    /// Page index below zero or page size below one
    #[error("Invalid page request (page {page_index}, size {page_size}): {reason}")]
    InvalidPage {
        page_index: i64,
        page_size: i64,
        reason: String,
    },

    /// Malformed JSON in a request parameter
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// A query string parameter does not deserialize
    #[error("Invalid query parameters: {message}")]
    InvalidQuery { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidPage { .. } => "INVALID_PAGE",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }

    /// The accumulated filter errors, empty for non-filter failures
    pub fn field_errors(&self) -> &[FilterError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FilterError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field(), e))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single field validation error as reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl From<&FilterError> for FieldValidationError {
    fn from(error: &FilterError) -> Self {
        Self {
            field: error.field().to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// A stored record could not be converted to or from its entity
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A lock guarding in-process state was poisoned
    #[error("Storage lock poisoned: {message}")]
    Poisoned { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {}", file_suffix(.file), .message)]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    Io { message: String },

    /// A configuration value is out of range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for QueryError {
    fn from(err: serde_yaml::Error) -> Self {
        QueryError::Config(ConfigError::Parse {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for QueryError {
    fn from(err: std::io::Error) -> Self {
        QueryError::Config(ConfigError::Io {
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for QueryError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<QueryError>() {
            Ok(query_err) => query_err,
            Err(err) => QueryError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoRepository<E>`, translating the generic predicate form of a
//! compiled query into a MongoDB filter document.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! this-query = { version = "0.0.9", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! MongoDB uses a **collection-per-entity-type** pattern. Each
//! `MongoRepository<E>` operates on a collection named after
//! `E::resource_name()` (e.g., "people", "roles").
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs and dates are stored as strings;
//! date-time fields are rewritten to a fixed-width UTC form so that string
//! order is chronological order. The `id` field is mapped to MongoDB's `_id`
//! convention.

use crate::core::entity::Entity;
use crate::core::error::{QueryResult, StorageError};
use crate::core::field::{EntityDescriptor, FieldType, FieldValue};
use crate::core::operator::Operator;
use crate::core::query::Page;
use crate::query::compiler::CompiledQuery;
use crate::query::page::{Direction, PageSpec};
use crate::query::predicate::Predicate;
use crate::storage::EntityRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;

const BACKEND: &str = "mongodb";

/// Stored form of date-time values
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn query_error(context: &str, error: mongodb::error::Error) -> StorageError {
    tracing::warn!(backend = BACKEND, %error, "{}", context);
    StorageError::Query {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, error),
    }
}

fn serialization_error(message: impl Into<String>) -> StorageError {
    StorageError::Serialization {
        message: message.into(),
    }
}

/// Document field holding `field`
fn document_field(field: &str) -> &str {
    if field == "id" { "_id" } else { field }
}

fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` and normalizing date-time fields.
fn json_to_document(
    json: serde_json::Value,
    descriptor: &EntityDescriptor,
) -> Result<Document, StorageError> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| serialization_error(format!("Failed to convert JSON to BSON: {}", e)))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(serialization_error("Expected BSON document, got non-object")),
    };

    for field in descriptor.fields() {
        if field.field_type != FieldType::DateTime {
            continue;
        }
        let normalized = match doc.get(field.name) {
            Some(Bson::String(raw)) => DateTime::parse_from_rfc3339(raw)
                .map(|parsed| format_date_time(&parsed.with_timezone(&Utc)))
                .map_err(|e| {
                    serialization_error(format!("Invalid date-time in '{}': {}", field.name, e))
                })?,
            _ => continue,
        };
        doc.insert(field.name, normalized);
    }

    // MongoDB convention: rename id → _id
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// BSON form of a typed filter value, matching the stored representation
fn value_to_bson(value: &FieldValue) -> Bson {
    match value {
        FieldValue::String(s) | FieldValue::Enum(s) => Bson::String(s.clone()),
        FieldValue::Integer(i) => Bson::Int64(*i),
        FieldValue::Float(f) => Bson::Double(*f),
        FieldValue::Boolean(b) => Bson::Boolean(*b),
        FieldValue::Date(d) => Bson::String(d.format("%Y-%m-%d").to_string()),
        FieldValue::DateTime(dt) => Bson::String(format_date_time(dt)),
        FieldValue::Null => Bson::Null,
    }
}

/// Translate a generic predicate into a MongoDB filter document
pub fn predicate_to_filter(predicate: &Predicate) -> Document {
    match predicate {
        Predicate::True => doc! {},
        Predicate::And(members) => {
            let members: Vec<Bson> = members
                .iter()
                .map(|p| Bson::Document(predicate_to_filter(p)))
                .collect();
            doc! { "$and": members }
        }
        Predicate::Compare {
            field,
            operator,
            value,
        } => {
            let value = value_to_bson(value);
            let text = || match &value {
                Bson::String(s) => regex::escape(s),
                other => regex::escape(&other.to_string()),
            };
            let condition = match operator {
                Operator::Eq => doc! { "$eq": value.clone() },
                // null and missing fields never match
                Operator::Ne => doc! { "$nin": [value.clone(), Bson::Null] },
                Operator::Gt => doc! { "$gt": value.clone() },
                Operator::Get => doc! { "$gte": value.clone() },
                Operator::Lt => doc! { "$lt": value.clone() },
                Operator::Let => doc! { "$lte": value.clone() },
                Operator::Like => doc! { "$regex": text() },
                Operator::StartsWith => doc! { "$regex": format!("^{}", text()) },
                Operator::EndsWith => doc! { "$regex": format!("{}\\z", text()) },
            };
            let mut filter = Document::new();
            filter.insert(document_field(field), condition);
            filter
        }
    }
}

/// Aggregation stages sorting with nulls last ascending and first descending
///
/// MongoDB sorts null lowest, so each key gets a helper flag sorted before it.
fn sort_stages(page: &PageSpec) -> Vec<Document> {
    let mut flags = Document::new();
    let mut sort = Document::new();
    let mut helpers = Vec::with_capacity(page.orders().len());

    for (index, order) in page.orders().iter().enumerate() {
        let helper = format!("__null_{}", index);
        let path = format!("${}", document_field(&order.field));
        flags.insert(
            helper.clone(),
            doc! { "$cond": [{ "$eq": [{ "$ifNull": [path, Bson::Null] }, Bson::Null] }, 1, 0] },
        );
        let direction = match order.direction {
            Direction::Asc => 1,
            Direction::Desc => -1,
        };
        sort.insert(helper.clone(), direction);
        sort.insert(document_field(&order.field), direction);
        helpers.push(helper);
    }
    if !sort.contains_key("_id") {
        sort.insert("_id", 1);
    }

    vec![
        doc! { "$addFields": flags },
        doc! { "$sort": sort },
        doc! { "$skip": i64::try_from(page.offset()).unwrap_or(i64::MAX) },
        doc! { "$limit": i64::try_from(page.page_size()).unwrap_or(i64::MAX) },
        doc! { "$unset": helpers },
    ]
}

// ---------------------------------------------------------------------------
// MongoRepository<E>
// ---------------------------------------------------------------------------

/// Entity repository backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use this_query::storage::MongoRepository;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let repository = MongoRepository::<Person>::new(client.database("mydb"));
/// let page = repository.execute(&query, &page_spec).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoRepository<E> {
    database: Database,
    _marker: std::marker::PhantomData<E>,
}

impl<E> MongoRepository<E> {
    /// Create a new `MongoRepository` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<E: Entity + Serialize + DeserializeOwned> MongoRepository<E> {
    /// Get the MongoDB collection for this entity type.
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(E::resource_name())
    }

    fn entity_to_document(entity: &E) -> Result<Document, StorageError> {
        let json = serde_json::to_value(entity)
            .map_err(|e| serialization_error(format!("Failed to serialize entity: {}", e)))?;
        json_to_document(json, E::descriptor())
    }

    fn document_to_entity(doc: Document) -> Result<E, StorageError> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(|e| {
            serialization_error(format!("Failed to deserialize entity from document: {}", e))
        })
    }
}

#[async_trait]
impl<E: Entity + Serialize + DeserializeOwned> EntityRepository<E> for MongoRepository<E> {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn save(&self, entity: E) -> QueryResult<E> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .replace_one(doc! { "_id": entity.id().to_string() }, doc)
            .upsert(true)
            .await
            .map_err(|e| query_error("Failed to save entity", e))?;

        Ok(entity)
    }

    async fn execute(&self, query: &CompiledQuery, page: &PageSpec) -> QueryResult<Page<E>> {
        page.validate_sort(E::descriptor())?;

        let filter = predicate_to_filter(&query.predicate);
        tracing::debug!(backend = BACKEND, filter = %filter, "executing query");

        let total = self
            .collection()
            .count_documents(filter.clone())
            .await
            .map_err(|e| query_error("Failed to count entities", e))?;

        let mut pipeline = vec![doc! { "$match": filter }];
        pipeline.extend(sort_stages(page));

        let docs: Vec<Document> = self
            .collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| query_error("Failed to fetch entities", e))?
            .try_collect()
            .await
            .map_err(|e| query_error("Failed to collect entities", e))?;

        let content = docs
            .into_iter()
            .map(Self::document_to_entity)
            .collect::<Result<Vec<E>, StorageError>>()?;

        Ok(Page {
            content,
            total,
            page_index: page.page_index(),
            page_size: page.page_size(),
        })
    }
}

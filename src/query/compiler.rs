//! Filter compiler
//!
//! Resolves, coerces and validates caller-supplied [`FilterDescriptor`]s
//! against one entity's descriptor table and drives the predicate builders.
//!
//! # Example
//!
//! ```rust,ignore
//! let filters = vec![FilterDescriptor::new("birthday", "2010-11-23", Operator::Ne)];
//! let query = FilterCompiler::for_entity::<Person>().compile(Some(filters.as_slice()))?;
//! let page = assemble(Person::descriptor(), 0, 20, None, None)?;
//! let people = repository.execute(&query, &page).await?;
//! ```

use crate::core::coerce::coerce_field;
use crate::core::entity::Entity;
use crate::core::error::{FilterError, ValidationError};
use crate::core::field::EntityDescriptor;
use crate::core::operator;
use crate::query::builder::PredicateBuilder;
use crate::query::filter::{FilterDescriptor, TypedCondition};
use crate::query::predicate::{GenericPredicateBuilder, Predicate};
use crate::query::specification::{Specification, SpecificationBuilder};
use validator::Validate;

/// The compiled filter in both representations
///
/// Executors pick the form their storage family understands; for any legal
/// input both forms select the same rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Relational form; `None` means no filter
    pub specification: Option<Specification>,
    /// Generic-predicate form; [`Predicate::True`] when there is no filter
    pub predicate: Predicate,
}

impl CompiledQuery {
    /// The query that matches every row
    pub fn match_all() -> Self {
        Self {
            specification: None,
            predicate: Predicate::True,
        }
    }

    pub fn is_match_all(&self) -> bool {
        self.specification.is_none() && self.predicate.is_tautology()
    }
}

/// Compiles filters for one entity
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler<'a> {
    descriptor: &'a EntityDescriptor,
}

impl<'a> FilterCompiler<'a> {
    pub fn new(descriptor: &'a EntityDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &'a EntityDescriptor {
        self.descriptor
    }

    /// Resolve, coerce and validate every filter
    ///
    /// All failures are collected, in filter order, at most one per filter.
    pub fn typed_conditions(
        &self,
        filters: &[FilterDescriptor],
    ) -> Result<Vec<TypedCondition>, ValidationError> {
        let mut conditions = Vec::with_capacity(filters.len());
        let mut errors = Vec::new();

        for filter in filters {
            match self.typed_condition(filter) {
                Ok(condition) => conditions.push(condition),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(conditions)
        } else {
            tracing::debug!(
                entity = self.descriptor.entity(),
                errors = errors.len(),
                "rejected filters"
            );
            Err(ValidationError::FieldErrors(errors))
        }
    }

    fn typed_condition(&self, filter: &FilterDescriptor) -> Result<TypedCondition, FilterError> {
        if filter.validate().is_err() {
            return Err(FilterError::UnknownField {
                entity: self.descriptor.entity().to_string(),
                field: filter.field.clone(),
            });
        }

        let field_type = self.descriptor.resolve(&filter.field)?;
        let value = coerce_field(&filter.field, &filter.value, field_type)?;
        operator::validate(&filter.field, filter.operator, field_type)?;

        Ok(TypedCondition::new(
            filter.field.clone(),
            field_type,
            filter.operator,
            value,
        ))
    }

    /// Compile filters with a single builder
    pub fn compile_with<B: PredicateBuilder>(
        &self,
        builder: &B,
        filters: Option<&[FilterDescriptor]>,
    ) -> Result<B::Output, ValidationError> {
        let conditions = match filters {
            Some(filters) if !filters.is_empty() => self.typed_conditions(filters)?,
            _ => Vec::new(),
        };
        self.build(builder, &conditions)
    }

    /// Compile filters into both query forms
    ///
    /// `None` and an empty list skip resolution and yield the match-all query.
    pub fn compile(
        &self,
        filters: Option<&[FilterDescriptor]>,
    ) -> Result<CompiledQuery, ValidationError> {
        let filters = match filters {
            Some(filters) if !filters.is_empty() => filters,
            _ => return Ok(CompiledQuery::match_all()),
        };

        let conditions = self.typed_conditions(filters)?;
        let query = CompiledQuery {
            specification: self.build(&SpecificationBuilder, &conditions)?,
            predicate: self.build(&GenericPredicateBuilder, &conditions)?,
        };

        tracing::debug!(
            entity = self.descriptor.entity(),
            conditions = conditions.len(),
            "compiled filters"
        );
        Ok(query)
    }

    fn build<B: PredicateBuilder>(
        &self,
        builder: &B,
        conditions: &[TypedCondition],
    ) -> Result<B::Output, ValidationError> {
        builder
            .build(self.descriptor, conditions)
            .map_err(|error| {
                tracing::debug!(builder = builder.name(), %error, "builder rejected condition");
                ValidationError::FieldErrors(vec![error])
            })
    }
}

impl FilterCompiler<'static> {
    /// Compiler over the static descriptor table of `E`
    pub fn for_entity<E: Entity>() -> Self {
        Self::new(E::descriptor())
    }
}

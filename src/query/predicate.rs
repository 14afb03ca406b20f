//! Generic boolean-expression form
//!
//! A [`Predicate`] can be evaluated directly against any [`Entity`] and is
//! translated by document-store executors into their native filter language.
//! The empty conjunction is the explicit tautology [`Predicate::True`].

use crate::core::entity::Entity;
use crate::core::error::FilterError;
use crate::core::field::{EntityDescriptor, FieldValue};
use crate::core::operator::Operator;
use crate::query::builder::{PredicateBuilder, check_condition};
use crate::query::filter::TypedCondition;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Matches everything
    True,

    /// One field compared against a typed value
    Compare {
        field: String,
        operator: Operator,
        value: FieldValue,
    },

    /// Every member must hold
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(field: impl Into<String>, operator: Operator, value: FieldValue) -> Self {
        Predicate::Compare {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn is_tautology(&self) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Compare { .. } => false,
            Predicate::And(members) => members.iter().all(Predicate::is_tautology),
        }
    }

    /// Conjunction with another predicate, flattening nested ANDs
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(right)) => {
                let mut members = Vec::with_capacity(right.len() + 1);
                members.push(p);
                members.extend(right);
                Predicate::And(members)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// Evaluate against field values supplied by `lookup`
    ///
    /// Missing or null values never satisfy a comparison, `NE` included.
    pub fn evaluate<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<FieldValue>,
    {
        match self {
            Predicate::True => true,
            Predicate::And(members) => members.iter().all(|p| p.evaluate(lookup)),
            Predicate::Compare {
                field,
                operator,
                value,
            } => match lookup(field) {
                Some(actual) if !actual.is_null() => compare(&actual, *operator, value),
                _ => false,
            },
        }
    }

    /// Evaluate against an entity's own field values
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.evaluate(&|field| entity.field_value(field))
    }
}

fn compare(actual: &FieldValue, operator: Operator, expected: &FieldValue) -> bool {
    if operator.is_textual() {
        return match (actual.as_string(), expected.as_string()) {
            (Some(actual), Some(expected)) => match operator {
                Operator::Like => actual.contains(expected),
                Operator::StartsWith => actual.starts_with(expected),
                Operator::EndsWith => actual.ends_with(expected),
                _ => false,
            },
            _ => false,
        };
    }

    let Some(ordering) = actual.compare(expected) else {
        return false;
    };
    match operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Get => ordering != Ordering::Less,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Let => ordering != Ordering::Greater,
        Operator::Like | Operator::StartsWith | Operator::EndsWith => false,
    }
}

/// Builds the generic-predicate form
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPredicateBuilder;

impl PredicateBuilder for GenericPredicateBuilder {
    type Output = Predicate;

    fn name(&self) -> &'static str {
        "predicate"
    }

    fn build(
        &self,
        descriptor: &EntityDescriptor,
        conditions: &[TypedCondition],
    ) -> Result<Self::Output, FilterError> {
        let mut predicate = Predicate::True;
        for condition in conditions {
            check_condition(descriptor, condition)?;
            predicate = predicate.and(Predicate::compare(
                condition.field(),
                condition.operator(),
                condition.value().clone(),
            ));
        }
        Ok(predicate)
    }
}

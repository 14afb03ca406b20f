//! Relational query form
//!
//! A [`Specification`] is a composable tree of column comparisons joined with
//! AND. Relational executors render it to a SQL boolean expression with bound
//! parameters; column expressions are supplied by the executor so the same
//! specification works over plain columns or JSON documents.
//!
//! # Example
//!
//! ```rust,ignore
//! let spec = compiled.specification.expect("filters were given");
//! let fragment = spec.to_sql(Placeholder::Dollar);
//! // "name" = $1 AND "birthday" <> $2
//! ```

use crate::core::error::FilterError;
use crate::core::field::{EntityDescriptor, FieldType, FieldValue};
use crate::core::operator::Operator;
use crate::query::builder::{PredicateBuilder, check_condition};
use crate::query::filter::TypedCondition;

/// SQL comparison operator of one [`Comparison`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    /// `LIKE` with `\` as escape character; the pattern carries the wildcards
    Like,
}

impl SqlOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlOperator::Equal => "=",
            SqlOperator::NotEqual => "<>",
            SqlOperator::Greater => ">",
            SqlOperator::GreaterOrEqual => ">=",
            SqlOperator::Less => "<",
            SqlOperator::LessOrEqual => "<=",
            SqlOperator::Like => "LIKE",
        }
    }
}

/// One column comparison against a bound parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub field_type: FieldType,
    pub operator: SqlOperator,
    /// Bound parameter; a LIKE pattern for the substring operators
    pub value: FieldValue,
}

impl Comparison {
    /// Translate a typed condition into its SQL comparison
    pub fn from_condition(condition: &TypedCondition) -> Self {
        let text = || condition.value().as_string().unwrap_or_default();
        let (operator, value) = match condition.operator() {
            Operator::Eq => (SqlOperator::Equal, condition.value().clone()),
            Operator::Ne => (SqlOperator::NotEqual, condition.value().clone()),
            Operator::Gt => (SqlOperator::Greater, condition.value().clone()),
            Operator::Get => (SqlOperator::GreaterOrEqual, condition.value().clone()),
            Operator::Lt => (SqlOperator::Less, condition.value().clone()),
            Operator::Let => (SqlOperator::LessOrEqual, condition.value().clone()),
            Operator::Like => (
                SqlOperator::Like,
                FieldValue::String(format!("%{}%", escape_like(text()))),
            ),
            Operator::StartsWith => (
                SqlOperator::Like,
                FieldValue::String(format!("{}%", escape_like(text()))),
            ),
            Operator::EndsWith => (
                SqlOperator::Like,
                FieldValue::String(format!("%{}", escape_like(text()))),
            ),
        };

        Self {
            field: condition.field().to_string(),
            field_type: condition.field_type(),
            operator,
            value,
        }
    }
}

/// Composable relational predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Specification {
    Compare(Comparison),
    And(Box<Specification>, Box<Specification>),
}

impl Specification {
    /// Combine with another specification; both must hold
    pub fn and(self, other: Specification) -> Specification {
        Specification::And(Box::new(self), Box::new(other))
    }

    /// All comparisons of the conjunction, left to right
    pub fn comparisons(&self) -> Vec<&Comparison> {
        match self {
            Specification::Compare(comparison) => vec![comparison],
            Specification::And(left, right) => {
                let mut comparisons = left.comparisons();
                comparisons.extend(right.comparisons());
                comparisons
            }
        }
    }

    /// Render over columns named after the fields
    pub fn to_sql(&self, placeholder: Placeholder) -> SqlFragment {
        self.to_sql_with(placeholder, 1, |field, _| quote_identifier(field))
    }

    /// Render with a custom column expression per field
    ///
    /// `first_param` is the number of the first placeholder, for statements
    /// that bind other parameters before the filter.
    pub fn to_sql_with<F>(&self, placeholder: Placeholder, first_param: usize, column: F) -> SqlFragment
    where
        F: Fn(&str, FieldType) -> String,
    {
        let comparisons = self.comparisons();
        let mut clauses = Vec::with_capacity(comparisons.len());
        let mut params = Vec::with_capacity(comparisons.len());

        for (offset, comparison) in comparisons.into_iter().enumerate() {
            let mut clause = format!(
                "{} {} {}",
                column(&comparison.field, comparison.field_type),
                comparison.operator.as_sql(),
                placeholder.render(first_param + offset)
            );
            if comparison.operator == SqlOperator::Like {
                clause.push_str(" ESCAPE '\\'");
            }
            clauses.push(clause);
            params.push(comparison.value.clone());
        }

        SqlFragment {
            sql: clauses.join(" AND "),
            params,
        }
    }
}

/// Bind-parameter syntax of the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
    /// `?` (MySQL, SQLite)
    Question,
}

impl Placeholder {
    pub fn render(&self, index: usize) -> String {
        match self {
            Placeholder::Dollar => format!("${}", index),
            Placeholder::Question => "?".to_string(),
        }
    }
}

/// A rendered SQL boolean expression and its parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

/// Quote an identifier with double quotes (ANSI SQL)
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Escape LIKE wildcards so the value matches literally
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the relational form
///
/// An empty condition list yields `None`: no filter, the executor matches all rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificationBuilder;

impl PredicateBuilder for SpecificationBuilder {
    type Output = Option<Specification>;

    fn name(&self) -> &'static str {
        "relational"
    }

    fn build(
        &self,
        descriptor: &EntityDescriptor,
        conditions: &[TypedCondition],
    ) -> Result<Self::Output, FilterError> {
        let mut specification: Option<Specification> = None;
        for condition in conditions {
            check_condition(descriptor, condition)?;
            let next = Specification::Compare(Comparison::from_condition(condition));
            specification = Some(match specification {
                Some(current) => current.and(next),
                None => next,
            });
        }
        Ok(specification)
    }
}

//! Shared capability of the predicate builders

use crate::core::error::FilterError;
use crate::core::field::EntityDescriptor;
use crate::core::operator;
use crate::query::filter::TypedCondition;

/// Turns a list of typed conditions into one backend's conjunctive predicate
///
/// Implementations must accept an empty list and return their "match all"
/// form. New storage families are supported by adding an implementation,
/// the compiler does not change.
pub trait PredicateBuilder {
    type Output;

    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Build the conjunction of `conditions` for the entity described by `descriptor`
    fn build(
        &self,
        descriptor: &EntityDescriptor,
        conditions: &[TypedCondition],
    ) -> Result<Self::Output, FilterError>;
}

/// Reject a condition that was not compiled against `descriptor`
pub fn check_condition(
    descriptor: &EntityDescriptor,
    condition: &TypedCondition,
) -> Result<(), FilterError> {
    let field_type = descriptor.resolve(condition.field())?;
    if field_type != condition.field_type() || !field_type.accepts(condition.value()) {
        return Err(FilterError::UnknownField {
            entity: descriptor.entity().to_string(),
            field: condition.field().to_string(),
        });
    }
    operator::validate(condition.field(), condition.operator(), field_type)
}

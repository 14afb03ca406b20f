//! Dynamic filter and page compilation
//!
//! ```text
//! FilterDescriptor ─▶ resolve ─▶ coerce ─▶ validate ─▶ TypedCondition
//!                                                        ├─▶ SpecificationBuilder ─▶ Option<Specification>
//!                                                        └─▶ GenericPredicateBuilder ─▶ Predicate
//! ```

pub mod builder;
pub mod compiler;
pub mod filter;
pub mod page;
pub mod predicate;
pub mod specification;

pub use builder::PredicateBuilder;
pub use compiler::{CompiledQuery, FilterCompiler};
pub use filter::{FilterDescriptor, TypedCondition};
pub use page::{Direction, PageSpec, SortOrder, assemble};
pub use predicate::{GenericPredicateBuilder, Predicate};
pub use specification::{
    Comparison, Placeholder, Specification, SpecificationBuilder, SqlFragment, SqlOperator,
};

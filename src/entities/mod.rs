//! Entity definition macros and the domain entities

pub mod macros;
pub mod domain;

pub use domain::{AuthProvider, Authentication, Gender, Permission, Person, ProviderType, Role};

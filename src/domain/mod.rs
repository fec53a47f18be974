//! Domain layer - Pure data-access abstractions
//!
//! This layer contains NO framework dependencies beyond the error
//! conversion from SeaORM. Entity, query and repository definitions only.

pub mod customer;
pub mod customer_specs;
pub mod errors;
pub mod example;
pub mod repositories;
pub mod sort;
pub mod specification;

pub use customer::{Customer, CustomerBuilder, CustomerField, CustomerSummary, FieldKind};
pub use errors::DomainError;
pub use example::{CustomerProbe, Example, ExampleMatcher, MatchMode, StringMatcher};
pub use repositories::*;
pub use sort::{Direction, Sort, SortKey};
pub use specification::{FieldValue, Operator, Predicate, Specification};

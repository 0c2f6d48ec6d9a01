//! Constraint Store
//!
//! Path assumptions (`assuming`) and proof obligations (negated `check`s) as
//! boolean terms over symbolic values.

pub mod domain;
pub mod infrastructure;

pub use domain::{Constraint, ConstraintKind};
pub use infrastructure::ConstraintStore;

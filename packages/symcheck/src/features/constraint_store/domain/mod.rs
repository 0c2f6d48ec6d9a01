//! Constraint Store - Domain

pub mod constraint;

pub use constraint::{Constraint, ConstraintKind};

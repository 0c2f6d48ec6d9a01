//! Constraint Store - Infrastructure

pub mod store;

pub use store::ConstraintStore;

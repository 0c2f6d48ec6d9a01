//! Execution Driver - Domain

pub mod program;

pub use program::{DriverState, Expr, Item, Program};

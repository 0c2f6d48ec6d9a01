//! Execution Driver
//!
//! Walks a straight-line program model, introduces fresh symbolic inputs,
//! applies assumptions and discharges every check against the constraint
//! store.
//!
//! ## Architecture
//!
//! ```text
//! execution
//! ├── domain/            # Program, Item, Expr, DriverState
//! └── infrastructure/    # ExecutionDriver, expression lowering
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{DriverState, Expr, Item, Program};
pub use infrastructure::{ExecutionDriver, Lowerer};

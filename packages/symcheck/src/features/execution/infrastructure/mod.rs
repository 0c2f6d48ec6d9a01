//! Execution Driver - Infrastructure

pub mod driver;
pub mod lowering;

pub use driver::ExecutionDriver;
pub use lowering::Lowerer;

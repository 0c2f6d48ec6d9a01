//! Symbolic Value Model - Domain
//!
//! Fixed-width integer types, symbols, terms and their concrete semantics.

pub mod symbol;
pub mod term;
pub mod types;
pub mod value;
pub mod witness;

pub use symbol::SymbolicInt;
pub use term::{BinOp, OpClass, Term, UnaryOp};
pub use types::{BitWidth, IntType, Signedness, Sort};
pub use value::{eval_arith, eval_compare, eval_unary, ConcreteValue, Value};
pub use witness::Witness;

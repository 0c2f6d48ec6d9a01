//! Symbolic Value Model
//!
//! Integers of fixed bit width as symbolic terms or concrete values, with
//! wraparound arithmetic exactly as the width dictates (8-bit: 127 + 1 = -128).
//! There is no implicit promotion to a wider type.
//!
//! ## Architecture
//!
//! ```text
//! symbolic
//! ├── domain/               # Types, symbols, terms, concrete semantics
//! └── infrastructure/       # TermBuilder + per-run symbol table
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    eval_arith, eval_compare, eval_unary, BinOp, BitWidth, ConcreteValue, IntType, OpClass,
    Signedness, Sort, SymbolicInt, Term, UnaryOp, Value, Witness,
};
pub use infrastructure::{SymbolTable, TermBuilder};

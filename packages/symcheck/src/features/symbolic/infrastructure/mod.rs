//! Symbolic Value Model - Infrastructure

pub mod term_builder;

pub use term_builder::{SymbolTable, TermBuilder};

//! Term Builder
//!
//! Owns the symbol namespace of one verification run. Symbol references are
//! resolved against it, so no term can mention an undeclared symbol.

use crate::errors::{EngineError, Result};
use crate::features::symbolic::domain::{
    BinOp, BitWidth, IntType, Signedness, SymbolicInt, Term, UnaryOp,
};

/// Symbols declared so far, in declaration order
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: Vec<SymbolicInt>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, symbol: SymbolicInt) -> Result<()> {
        if self.lookup(symbol.name()).is_some() {
            return Err(EngineError::duplicate(symbol.name()));
        }
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolicInt> {
        self.symbols.iter().find(|s| s.name() == name)
    }

    pub fn symbols(&self) -> &[SymbolicInt] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

/// Builds well-formed terms for one run
#[derive(Debug, Default)]
pub struct TermBuilder {
    table: SymbolTable,
}

impl TermBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_literal(&self, value: i128, ty: IntType) -> Result<Term> {
        Term::literal(value, ty)
    }

    /// Declare a fresh symbolic input and return it
    pub fn make_symbol(
        &mut self,
        name: impl Into<String>,
        width: BitWidth,
        signedness: Signedness,
    ) -> Result<SymbolicInt> {
        let symbol = SymbolicInt::new(name, width, signedness);
        self.table.declare(symbol.clone())?;
        Ok(symbol)
    }

    /// Reference a previously declared symbol
    pub fn symbol_ref(&self, name: &str) -> Result<Term> {
        self.table
            .lookup(name)
            .cloned()
            .map(Term::symbol)
            .ok_or_else(|| EngineError::undeclared(name))
    }

    pub fn apply_binop(&self, op: BinOp, lhs: Term, rhs: Term) -> Result<Term> {
        Term::binary(op, lhs, rhs)
    }

    pub fn apply_unary(&self, op: UnaryOp, operand: Term) -> Result<Term> {
        Term::unary(op, operand)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    /// Forget every declared symbol
    pub fn reset(&mut self) {
        self.table.clear();
    }
}

//! Expression lowering
//!
//! Turns source expressions into well-formed terms against the run's symbol
//! table. Untyped integer constants take the type of the operand they are
//! combined with; with no typed operand around they are `int32_t`. A
//! bitvector used as a condition means `e != 0`.

use crate::errors::Result;
use crate::features::execution::domain::Expr;
use crate::features::symbolic::{BinOp, IntType, OpClass, Term, TermBuilder, UnaryOp};

pub struct Lowerer<'a> {
    builder: &'a TermBuilder,
}

impl<'a> Lowerer<'a> {
    pub fn new(builder: &'a TermBuilder) -> Self {
        Self { builder }
    }

    /// Lower an expression used as a condition (`assuming`, `check`, `&&`, `!`)
    pub fn lower_condition(&self, expr: &Expr) -> Result<Term> {
        let term = self.lower(expr, None)?;
        match term.sort().int_type() {
            Some(ty) => {
                let zero = self.builder.make_literal(0, ty)?;
                self.builder.apply_binop(BinOp::Ne, term, zero)
            }
            None => Ok(term),
        }
    }

    /// Lower an expression; `expected` types any untyped constant inside it
    pub fn lower(&self, expr: &Expr, expected: Option<IntType>) -> Result<Term> {
        match expr {
            Expr::Int { value, ty } => {
                let ty = ty.or(expected).unwrap_or(IntType::C_INT);
                self.builder.make_literal(*value, ty)
            }
            Expr::Var(name) => self.builder.symbol_ref(name),
            Expr::Binary { op, lhs, rhs } => match op.class() {
                OpClass::Logical => {
                    let l = self.lower_condition(lhs)?;
                    let r = self.lower_condition(rhs)?;
                    self.builder.apply_binop(*op, l, r)
                }
                OpClass::Arithmetic | OpClass::Comparison => {
                    let operand_ty = match op.class() {
                        OpClass::Arithmetic => self.type_of(expr).or(expected),
                        _ => self.operand_type(lhs, rhs),
                    };
                    let l = self.lower(lhs, operand_ty)?;
                    let r = self.lower(rhs, operand_ty)?;
                    self.builder.apply_binop(*op, l, r)
                }
            },
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not => {
                    let inner = self.lower_condition(operand)?;
                    self.builder.apply_unary(UnaryOp::Not, inner)
                }
                UnaryOp::Neg | UnaryOp::BitNot => {
                    let inner = self.lower(operand, self.type_of(operand).or(expected))?;
                    self.builder.apply_unary(*op, inner)
                }
            },
        }
    }

    fn operand_type(&self, lhs: &Expr, rhs: &Expr) -> Option<IntType> {
        combine(self.type_of(lhs), self.type_of(rhs))
    }

    /// Integer type an expression has on its own, if any. Undeclared names
    /// have none here; `lower` reports them.
    fn type_of(&self, expr: &Expr) -> Option<IntType> {
        match expr {
            Expr::Int { ty, .. } => *ty,
            Expr::Var(name) => self.builder.symbols().lookup(name).map(|s| s.ty()),
            Expr::Binary { op, lhs, rhs } => match op.class() {
                OpClass::Arithmetic => self.operand_type(lhs, rhs),
                OpClass::Comparison | OpClass::Logical => None,
            },
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not => None,
                UnaryOp::Neg | UnaryOp::BitNot => self.type_of(operand),
            },
        }
    }
}

fn combine(lhs: Option<IntType>, rhs: Option<IntType>) -> Option<IntType> {
    match (lhs, rhs) {
        (Some(l), Some(r)) if l.width == r.width => Some(IntType::common(l, r)),
        (Some(l), _) => Some(l),
        (None, r) => r,
    }
}

//! Z3 SMT Solver Backend - Bitvector Theory
//!
//! Encodes each symbol as a Z3 bitvector constant of its width and each term
//! as the matching `bv*` operation. Z3's bitvector division, remainder and
//! shift semantics are the SMT-LIB ones, so models agree with concrete
//! evaluation.
//!
//! Only available when compiled with `--features z3`.
//!
//! ## Installation
//!
//! ```bash
//! # Install Z3 library
//! apt-get install libz3-dev  # Linux
//! brew install z3            # macOS
//!
//! # Build with Z3 support
//! cargo build --release --features z3
//! ```

#![cfg(feature = "z3")]

use super::SolverBackend;
use crate::features::constraint_store::Constraint;
use crate::features::solver::domain::{SatResult, SolveBudget, SolverError};
use crate::features::symbolic::{
    BinOp, ConcreteValue, OpClass, Sort, SymbolicInt, Term, UnaryOp, Witness,
};
use z3::ast::{Ast, Bool, BV};
use z3::{Config, Context, SatResult as Z3SatResult, Solver};

/// Z3 bitvector backend; a new context is created for every query
#[derive(Debug, Default)]
pub struct Z3Backend;

impl Z3Backend {
    pub fn new() -> Self {
        Self
    }
}

/// Term → Z3 AST translation over one context
struct Encoder<'ctx> {
    ctx: &'ctx Context,
    symbols: Vec<(SymbolicInt, BV<'ctx>)>,
}

impl<'ctx> Encoder<'ctx> {
    fn new(ctx: &'ctx Context) -> Self {
        Self {
            ctx,
            symbols: Vec::new(),
        }
    }

    fn symbol(&mut self, symbol: &SymbolicInt) -> BV<'ctx> {
        if let Some((_, bv)) = self.symbols.iter().find(|(s, _)| s.name() == symbol.name()) {
            return bv.clone();
        }
        let bv = BV::new_const(self.ctx, symbol.name(), symbol.ty().bits());
        self.symbols.push((symbol.clone(), bv.clone()));
        bv
    }

    fn encode_bool(&mut self, term: &Term) -> Result<Bool<'ctx>, SolverError> {
        match term {
            Term::UnaryOp {
                op: UnaryOp::Not,
                operand,
                ..
            } => Ok(self.encode_bool(operand)?.not()),
            Term::BinOp { op, lhs, rhs, .. } => match op.class() {
                OpClass::Logical => {
                    let a = self.encode_bool(lhs)?;
                    let b = self.encode_bool(rhs)?;
                    Ok(if *op == BinOp::And {
                        Bool::and(self.ctx, &[&a, &b])
                    } else {
                        Bool::or(self.ctx, &[&a, &b])
                    })
                }
                OpClass::Comparison if lhs.is_bool() => {
                    let a = self.encode_bool(lhs)?;
                    let b = self.encode_bool(rhs)?;
                    let same = a._eq(&b);
                    Ok(if *op == BinOp::Eq { same } else { same.not() })
                }
                OpClass::Comparison => {
                    let signed = Term::comparison_type(lhs, rhs)
                        .map(|ty| ty.is_signed())
                        .ok_or_else(|| encoding_error("bitvector", term))?;
                    let a = self.encode_bv(lhs)?;
                    let b = self.encode_bv(rhs)?;
                    Ok(match (op, signed) {
                        (BinOp::Eq, _) => a._eq(&b),
                        (BinOp::Ne, _) => a._eq(&b).not(),
                        (BinOp::Lt, true) => a.bvslt(&b),
                        (BinOp::Lt, false) => a.bvult(&b),
                        (BinOp::Le, true) => a.bvsle(&b),
                        (BinOp::Le, false) => a.bvule(&b),
                        (BinOp::Gt, true) => a.bvsgt(&b),
                        (BinOp::Gt, false) => a.bvugt(&b),
                        (BinOp::Ge, true) => a.bvsge(&b),
                        (BinOp::Ge, false) => a.bvuge(&b),
                        _ => return Err(encoding_error("boolean", term)),
                    })
                }
                OpClass::Arithmetic => Err(encoding_error("boolean", term)),
            },
            _ => Err(encoding_error("boolean", term)),
        }
    }

    fn encode_bv(&mut self, term: &Term) -> Result<BV<'ctx>, SolverError> {
        match term {
            Term::Literal(value) => Ok(BV::from_u64(self.ctx, value.bits(), value.ty().bits())),
            Term::Symbol(symbol) => Ok(self.symbol(symbol)),
            Term::UnaryOp { op, operand, .. } => {
                let a = self.encode_bv(operand)?;
                match op {
                    UnaryOp::Neg => Ok(a.bvneg()),
                    UnaryOp::BitNot => Ok(a.bvnot()),
                    UnaryOp::Not => Err(encoding_error("bitvector", term)),
                }
            }
            Term::BinOp {
                op,
                sort: Sort::BitVec(ty),
                lhs,
                rhs,
            } => {
                let a = self.encode_bv(lhs)?;
                let b = self.encode_bv(rhs)?;
                let signed = ty.is_signed();
                Ok(match op {
                    BinOp::Add => a.bvadd(&b),
                    BinOp::Sub => a.bvsub(&b),
                    BinOp::Mul => a.bvmul(&b),
                    BinOp::Div if signed => a.bvsdiv(&b),
                    BinOp::Div => a.bvudiv(&b),
                    BinOp::Rem if signed => a.bvsrem(&b),
                    BinOp::Rem => a.bvurem(&b),
                    BinOp::BitAnd => a.bvand(&b),
                    BinOp::BitOr => a.bvor(&b),
                    BinOp::BitXor => a.bvxor(&b),
                    BinOp::Shl => a.bvshl(&b),
                    BinOp::Shr if signed => a.bvashr(&b),
                    BinOp::Shr => a.bvlshr(&b),
                    _ => return Err(encoding_error("bitvector", term)),
                })
            }
            Term::BinOp { .. } => Err(encoding_error("bitvector", term)),
        }
    }
}

fn encoding_error(expected: &str, term: &Term) -> SolverError {
    SolverError::Encoding(format!("expected a {} term, found {}", expected, term))
}

impl SolverBackend for Z3Backend {
    fn name(&self) -> &'static str {
        "z3"
    }

    fn check(&mut self, constraints: &[Constraint], budget: &SolveBudget) -> SatResult {
        if budget.expired() {
            return SolverError::Timeout.into();
        }

        let mut cfg = Config::new();
        if let Some(ms) = budget.remaining_ms() {
            cfg.set_timeout_msec(ms);
        }
        let ctx = Context::new(&cfg);
        let solver = Solver::new(&ctx);
        let mut encoder = Encoder::new(&ctx);

        for constraint in constraints {
            match encoder.encode_bool(constraint.term()) {
                Ok(formula) => solver.assert(&formula),
                Err(e) => return e.into(),
            }
        }

        match solver.check() {
            Z3SatResult::Sat => {
                let Some(model) = solver.get_model() else {
                    return SolverError::Backend("sat without a model".to_string()).into();
                };
                let mut witness = Witness::new();
                for (symbol, bv) in &encoder.symbols {
                    let Some(bits) = model.eval(bv, true).and_then(|v| v.as_u64()) else {
                        return SolverError::Backend(format!(
                            "no model value for '{}'",
                            symbol.name()
                        ))
                        .into();
                    };
                    witness.insert_value(symbol.clone(), ConcreteValue::from_bits(bits, symbol.ty()));
                }
                SatResult::Sat(witness)
            }
            Z3SatResult::Unsat => SatResult::Unsat,
            Z3SatResult::Unknown => {
                let reason = solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string());
                if reason.contains("timeout") || reason.contains("canceled") {
                    SolverError::Timeout.into()
                } else {
                    SolverError::Backend(reason).into()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::{BitWidth, IntType, Signedness};

    fn var(name: &str) -> Term {
        Term::symbol(SymbolicInt::new(name, BitWidth::W8, Signedness::Signed))
    }

    fn lit(v: i128) -> Term {
        Term::literal(v, IntType::signed(BitWidth::W8)).unwrap()
    }

    #[test]
    fn test_z3_backend_name() {
        assert_eq!(Z3Backend::new().name(), "z3");
    }

    #[test]
    fn test_z3_wraparound_witness() {
        let mut backend = Z3Backend::new();
        let x = var("x");
        let grows = Term::binary(BinOp::Gt, Term::binary(BinOp::Add, x.clone(), lit(1)).unwrap(), x.clone())
            .unwrap();
        let constraints = vec![
            Constraint::assumption(Term::binary(BinOp::Gt, x, lit(0)).unwrap()).unwrap(),
            Constraint::obligation(grows).unwrap(),
        ];
        match backend.check(&constraints, &SolveBudget::unlimited()) {
            SatResult::Sat(w) => assert_eq!(w.value_of("x"), Some(127)),
            other => panic!("expected sat, got {:?}", other),
        }
    }

    #[test]
    fn test_z3_unsat() {
        let mut backend = Z3Backend::new();
        let x = var("x");
        let constraints = vec![
            Constraint::assumption(Term::binary(BinOp::Lt, x.clone(), lit(5)).unwrap()).unwrap(),
            Constraint::obligation(Term::binary(BinOp::Lt, x, lit(10)).unwrap()).unwrap(),
        ];
        assert_eq!(
            backend.check(&constraints, &SolveBudget::unlimited()),
            SatResult::Unsat
        );
    }
}

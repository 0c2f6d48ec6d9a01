//! Term trees
//!
//! A term is a closed tagged variant: literal, symbol reference, binary or
//! unary operator. Constructors check sorts and widths, so a `Term` that
//! exists is always well-formed. Evaluation uses the same operator table as
//! every solver backend (see `value.rs`).

use super::symbol::SymbolicInt;
use super::types::{IntType, Sort};
use super::value::{eval_arith, eval_compare, eval_unary, ConcreteValue, Value};
use super::witness::Witness;
use crate::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Operator families, which decide operand and result sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// bitvector × bitvector → bitvector
    Arithmetic,
    /// bitvector × bitvector → bool (`==`/`!=` also accept bool × bool)
    Comparison,
    /// bool × bool → bool
    Logical,
}

impl BinOp {
    pub const ALL: [BinOp; 18] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Shl,
        Self::Shr,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::And,
        Self::Or,
    ];

    pub fn class(self) -> OpClass {
        match self {
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Rem
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::Shl
            | Self::Shr => OpClass::Arithmetic,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => OpClass::Comparison,
            Self::And | Self::Or => OpClass::Logical,
        }
    }

    /// C spelling
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Logical negation (bool)
    Not,
    /// Two's-complement negation (bitvector)
    Neg,
    /// Bitwise complement (bitvector)
    BitNot,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
            Self::BitNot => "~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(Self::Not),
            "-" => Some(Self::Neg),
            "~" => Some(Self::BitNot),
            _ => None,
        }
    }
}

/// Expression tree over symbolic integers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Literal(ConcreteValue),
    Symbol(SymbolicInt),
    BinOp {
        op: BinOp,
        sort: Sort,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
    UnaryOp {
        op: UnaryOp,
        sort: Sort,
        operand: Box<Term>,
    },
}

impl Term {
    /// Literal of type `ty`, stored as its bit pattern.
    ///
    /// Signed types take only their own range. Unsigned types also take
    /// negative values down to the signed minimum of the width, so `a != -1`
    /// means the all-ones pattern.
    pub fn literal(value: i128, ty: IntType) -> Result<Self> {
        let lowest = IntType::signed(ty.width).min_value();
        if value < lowest || value > ty.max_value() {
            return Err(EngineError::LiteralOutOfRange {
                value,
                ty: ty.to_string(),
                location: None,
            });
        }
        Ok(Self::Literal(ConcreteValue::wrapping_from_i128(value, ty)))
    }

    pub fn symbol(symbol: SymbolicInt) -> Self {
        Self::Symbol(symbol)
    }

    /// Build `lhs op rhs`, checking operand sorts and widths
    pub fn binary(op: BinOp, lhs: Term, rhs: Term) -> Result<Self> {
        let sort = match (op.class(), lhs.sort(), rhs.sort()) {
            (OpClass::Arithmetic | OpClass::Comparison, Sort::BitVec(l), Sort::BitVec(r)) => {
                if l.width != r.width {
                    return Err(EngineError::width_mismatch(op.symbol(), &lhs, &rhs, l, r));
                }
                match op.class() {
                    OpClass::Arithmetic => Sort::BitVec(IntType::common(l, r)),
                    _ => Sort::Bool,
                }
            }
            (OpClass::Comparison, Sort::Bool, Sort::Bool) if matches!(op, BinOp::Eq | BinOp::Ne) => {
                Sort::Bool
            }
            (OpClass::Logical, Sort::Bool, Sort::Bool) => Sort::Bool,
            (OpClass::Logical, l, r) => {
                let found = if l.is_bool() { r } else { l };
                return Err(EngineError::sort_mismatch(
                    format!("{} {} {}", lhs, op, rhs),
                    Sort::Bool,
                    found,
                ));
            }
            (_, l, r) => {
                let found = if l.is_bool() { l } else { r };
                return Err(EngineError::sort_mismatch(
                    format!("{} {} {}", lhs, op, rhs),
                    "bitvector",
                    found,
                ));
            }
        };
        Ok(Self::BinOp {
            op,
            sort,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Build `op operand`
    pub fn unary(op: UnaryOp, operand: Term) -> Result<Self> {
        let sort = match (op, operand.sort()) {
            (UnaryOp::Not, Sort::Bool) => Sort::Bool,
            (UnaryOp::Neg | UnaryOp::BitNot, Sort::BitVec(ty)) => Sort::BitVec(ty),
            (UnaryOp::Not, found) => {
                return Err(EngineError::sort_mismatch(
                    format!("!{}", operand),
                    Sort::Bool,
                    found,
                ))
            }
            (_, found) => {
                return Err(EngineError::sort_mismatch(
                    format!("{}{}", op.symbol(), operand),
                    "bitvector",
                    found,
                ))
            }
        };
        Ok(Self::UnaryOp {
            op,
            sort,
            operand: Box::new(operand),
        })
    }

    /// Logical negation of a boolean term
    pub fn negate(self) -> Result<Self> {
        Self::unary(UnaryOp::Not, self)
    }

    pub fn sort(&self) -> Sort {
        match self {
            Self::Literal(value) => Sort::BitVec(value.ty()),
            Self::Symbol(symbol) => Sort::BitVec(symbol.ty()),
            Self::BinOp { sort, .. } | Self::UnaryOp { sort, .. } => *sort,
        }
    }

    pub fn is_bool(&self) -> bool {
        self.sort().is_bool()
    }

    /// Symbols referenced by this term, in first-occurrence order
    pub fn symbols(&self) -> Vec<&SymbolicInt> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a SymbolicInt>) {
        match self {
            Self::Literal(_) => {}
            Self::Symbol(symbol) => {
                if !out.contains(&symbol) {
                    out.push(symbol);
                }
            }
            Self::BinOp { lhs, rhs, .. } => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
            Self::UnaryOp { operand, .. } => operand.collect_symbols(out),
        }
    }

    /// Concrete value under an assignment. Returns `None` when a referenced
    /// symbol has no value in `witness`.
    pub fn evaluate(&self, witness: &Witness) -> Option<Value> {
        match self {
            Self::Literal(value) => Some(Value::Int(*value)),
            Self::Symbol(symbol) => witness.get(symbol.name()).map(Value::Int),
            Self::UnaryOp { op, operand, .. } => match (op, operand.evaluate(witness)?) {
                (UnaryOp::Not, Value::Bool(b)) => Some(Value::Bool(!b)),
                (_, Value::Int(v)) => {
                    let bits = eval_unary(*op, v.bits(), v.ty())?;
                    Some(Value::Int(ConcreteValue::from_bits(bits, v.ty())))
                }
                _ => None,
            },
            Self::BinOp { op, sort, lhs, rhs } => {
                let l = lhs.evaluate(witness)?;
                let r = rhs.evaluate(witness)?;
                match (op.class(), l, r) {
                    (OpClass::Logical, Value::Bool(a), Value::Bool(b)) => {
                        Some(Value::Bool(if *op == BinOp::And { a && b } else { a || b }))
                    }
                    (OpClass::Comparison, Value::Bool(a), Value::Bool(b)) => {
                        Some(Value::Bool(if *op == BinOp::Eq { a == b } else { a != b }))
                    }
                    (OpClass::Comparison, Value::Int(a), Value::Int(b)) => {
                        let ty = IntType::common(a.ty(), b.ty());
                        eval_compare(*op, a.bits(), b.bits(), ty).map(Value::Bool)
                    }
                    (OpClass::Arithmetic, Value::Int(a), Value::Int(b)) => {
                        let ty = sort.int_type()?;
                        let bits = eval_arith(*op, a.bits(), b.bits(), ty)?;
                        Some(Value::Int(ConcreteValue::from_bits(bits, ty)))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Operand type of a comparison node (signedness decides the ordering)
    pub fn comparison_type(lhs: &Term, rhs: &Term) -> Option<IntType> {
        Some(IntType::common(lhs.sort().int_type()?, rhs.sort().int_type()?))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Symbol(symbol) => f.write_str(symbol.name()),
            Self::BinOp { op, lhs, rhs, .. } => write!(f, "({} {} {})", lhs, op, rhs),
            Self::UnaryOp { op, operand, .. } => write!(f, "{}{}", op.symbol(), operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::domain::types::{BitWidth, Signedness};

    fn sym(name: &str, width: BitWidth) -> Term {
        Term::symbol(SymbolicInt::new(name, width, Signedness::Signed))
    }

    fn lit(v: i128, width: BitWidth) -> Term {
        Term::literal(v, IntType::signed(width)).unwrap()
    }

    #[test]
    fn test_width_mismatch_is_construction_error() {
        let err = Term::binary(BinOp::Add, sym("x", BitWidth::W8), sym("y", BitWidth::W32))
            .unwrap_err();
        assert!(matches!(err, EngineError::WidthMismatch { ref op, .. } if op == "+"));
    }

    #[test]
    fn test_comparison_yields_bool() {
        let t = Term::binary(BinOp::Gt, sym("y", BitWidth::W8), lit(0, BitWidth::W8)).unwrap();
        assert_eq!(t.sort(), Sort::Bool);
        assert_eq!(t.to_string(), "(y > 0)");
    }

    #[test]
    fn test_arithmetic_on_bool_is_sort_error() {
        let cmp = Term::binary(BinOp::Gt, sym("y", BitWidth::W8), lit(0, BitWidth::W8)).unwrap();
        let err = Term::binary(BinOp::Add, cmp, lit(1, BitWidth::W8)).unwrap_err();
        assert!(matches!(err, EngineError::SortMismatch { .. }));
    }

    #[test]
    fn test_negate_requires_bool() {
        assert!(sym("x", BitWidth::W8).negate().is_err());
        let cmp = Term::binary(BinOp::Eq, sym("x", BitWidth::W8), lit(3, BitWidth::W8)).unwrap();
        assert_eq!(cmp.negate().unwrap().sort(), Sort::Bool);
    }

    #[test]
    fn test_literal_range() {
        let ty = IntType::signed(BitWidth::W8);
        assert!(Term::literal(-128, ty).is_ok());
        assert!(Term::literal(127, ty).is_ok());
        assert!(matches!(
            Term::literal(200, ty),
            Err(EngineError::LiteralOutOfRange { value: 200, .. })
        ));
        assert!(Term::literal(-129, ty).is_err());

        let unsigned = IntType::unsigned(BitWidth::W8);
        assert_eq!(
            Term::literal(255, unsigned).unwrap(),
            Term::literal(-1, unsigned).unwrap()
        );
        assert!(Term::literal(256, unsigned).is_err());
        assert!(Term::literal(-129, unsigned).is_err());
    }

    #[test]
    fn test_evaluate_wraps_at_width() {
        let x = SymbolicInt::new("x", BitWidth::W8, Signedness::Signed);
        let sum = Term::binary(BinOp::Add, Term::symbol(x.clone()), lit(1, BitWidth::W8)).unwrap();
        let gt = Term::binary(BinOp::Gt, sum.clone(), Term::symbol(x.clone())).unwrap();

        let mut w = Witness::new();
        w.insert(x, 127);
        assert_eq!(sum.evaluate(&w).unwrap().as_int().unwrap().to_i128(), -128);
        assert_eq!(gt.evaluate(&w), Some(Value::Bool(false)));
    }

    #[test]
    fn test_symbols_deduplicated_in_order() {
        let t = Term::binary(
            BinOp::Add,
            Term::binary(BinOp::Add, sym("x", BitWidth::W8), sym("y", BitWidth::W8)).unwrap(),
            sym("x", BitWidth::W8),
        )
        .unwrap();
        let names: Vec<_> = t.symbols().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_mixed_signedness_is_unsigned() {
        let u = Term::symbol(SymbolicInt::new("u", BitWidth::W8, Signedness::Unsigned));
        let t = Term::binary(BinOp::Add, sym("s", BitWidth::W8), u).unwrap();
        assert_eq!(t.sort(), Sort::BitVec(IntType::unsigned(BitWidth::W8)));
    }

    #[test]
    fn test_op_symbols_roundtrip() {
        for op in BinOp::ALL {
            assert_eq!(BinOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(UnaryOp::from_symbol("~"), Some(UnaryOp::BitNot));
    }
}

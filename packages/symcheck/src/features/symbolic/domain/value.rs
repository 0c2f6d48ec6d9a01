//! Concrete fixed-width values and their operator semantics
//!
//! Values are stored as bit patterns masked to their width. Division,
//! remainder and shifts follow the SMT-LIB bitvector definitions so that
//! concrete evaluation agrees with every solver backend.

use super::term::{BinOp, UnaryOp};
use super::types::IntType;
use std::fmt;

/// A concrete integer of a fixed-width type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConcreteValue {
    bits: u64,
    ty: IntType,
}

impl ConcreteValue {
    /// Build from a raw bit pattern (upper bits are discarded)
    pub fn from_bits(bits: u64, ty: IntType) -> Self {
        Self {
            bits: bits & ty.width.mask(),
            ty,
        }
    }

    /// Build from a mathematical integer, wrapping modulo 2^width
    pub fn wrapping_from_i128(value: i128, ty: IntType) -> Self {
        Self::from_bits(value as u64, ty)
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn ty(&self) -> IntType {
        self.ty
    }

    /// Integer value under the type's signedness
    pub fn to_i128(&self) -> i128 {
        if self.ty.is_signed() && self.bits & self.ty.width.sign_bit() != 0 {
            (self.bits | !self.ty.width.mask()) as i64 as i128
        } else {
            self.bits as i128
        }
    }

    /// Same bit pattern, different type of equal width
    pub fn reinterpret(&self, ty: IntType) -> Self {
        Self::from_bits(self.bits, ty)
    }
}

impl fmt::Display for ConcreteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

/// Result of evaluating a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(ConcreteValue),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<ConcreteValue> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(v) => write!(f, "{}", v),
        }
    }
}

/// Arithmetic and bitwise operators over bit patterns of type `ty`.
///
/// Returns `None` for comparison and logical operators.
pub fn eval_arith(op: BinOp, a: u64, b: u64, ty: IntType) -> Option<u64> {
    let mask = ty.width.mask();
    let bits = ty.bits() as u64;
    let result = match op {
        BinOp::Add => a.wrapping_add(b),
        BinOp::Sub => a.wrapping_sub(b),
        BinOp::Mul => a.wrapping_mul(b),
        BinOp::Div if ty.is_signed() => sdiv(a, b, ty),
        BinOp::Div => udiv(a, b, mask),
        BinOp::Rem if ty.is_signed() => srem(a, b, ty),
        BinOp::Rem => urem(a, b),
        BinOp::BitAnd => a & b,
        BinOp::BitOr => a | b,
        BinOp::BitXor => a ^ b,
        BinOp::Shl => {
            if b >= bits {
                0
            } else {
                a << b
            }
        }
        BinOp::Shr => {
            let negative = a & ty.width.sign_bit() != 0;
            if ty.is_signed() && negative {
                if b >= bits {
                    mask
                } else {
                    (a >> b) | (mask & !(mask >> b))
                }
            } else if b >= bits {
                0
            } else {
                a >> b
            }
        }
        BinOp::Eq
        | BinOp::Ne
        | BinOp::Lt
        | BinOp::Le
        | BinOp::Gt
        | BinOp::Ge
        | BinOp::And
        | BinOp::Or => return None,
    };
    Some(result & mask)
}

/// Comparison of two bit patterns of type `ty`.
///
/// Returns `None` for non-comparison operators.
pub fn eval_compare(op: BinOp, a: u64, b: u64, ty: IntType) -> Option<bool> {
    let ordering = if ty.is_signed() {
        ConcreteValue::from_bits(a, ty)
            .to_i128()
            .cmp(&ConcreteValue::from_bits(b, ty).to_i128())
    } else {
        a.cmp(&b)
    };
    let result = match op {
        BinOp::Eq => a == b,
        BinOp::Ne => a != b,
        BinOp::Lt => ordering.is_lt(),
        BinOp::Le => ordering.is_le(),
        BinOp::Gt => ordering.is_gt(),
        BinOp::Ge => ordering.is_ge(),
        _ => return None,
    };
    Some(result)
}

/// Unary bitvector operators
pub fn eval_unary(op: UnaryOp, a: u64, ty: IntType) -> Option<u64> {
    let mask = ty.width.mask();
    match op {
        UnaryOp::Neg => Some(a.wrapping_neg() & mask),
        UnaryOp::BitNot => Some(!a & mask),
        UnaryOp::Not => None,
    }
}

fn udiv(a: u64, b: u64, mask: u64) -> u64 {
    if b == 0 {
        mask
    } else {
        a / b
    }
}

fn urem(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        a % b
    }
}

fn negative(a: u64, ty: IntType) -> bool {
    a & ty.width.sign_bit() != 0
}

fn neg(a: u64, ty: IntType) -> u64 {
    a.wrapping_neg() & ty.width.mask()
}

fn sdiv(a: u64, b: u64, ty: IntType) -> u64 {
    let mask = ty.width.mask();
    match (negative(a, ty), negative(b, ty)) {
        (false, false) => udiv(a, b, mask),
        (true, false) => neg(udiv(neg(a, ty), b, mask), ty),
        (false, true) => neg(udiv(a, neg(b, ty), mask), ty),
        (true, true) => udiv(neg(a, ty), neg(b, ty), mask),
    }
}

fn srem(a: u64, b: u64, ty: IntType) -> u64 {
    match (negative(a, ty), negative(b, ty)) {
        (false, false) => urem(a, b),
        (true, false) => neg(urem(neg(a, ty), b), ty),
        (false, true) => urem(a, neg(b, ty)),
        (true, true) => neg(urem(neg(a, ty), neg(b, ty)), ty),
    }
}

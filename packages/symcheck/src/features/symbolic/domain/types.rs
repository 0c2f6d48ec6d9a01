//! Fixed-width integer types and term sorts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported bit widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitWidth {
    W8,
    W16,
    W32,
    W64,
}

impl BitWidth {
    /// All widths, narrowest first
    pub const ALL: [BitWidth; 4] = [Self::W8, Self::W16, Self::W32, Self::W64];

    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    /// Mask selecting the low `bits()` bits of a u64
    pub const fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            other => (1u64 << other.bits()) - 1,
        }
    }

    pub const fn sign_bit(self) -> u64 {
        1u64 << (self.bits() - 1)
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
            .ok_or_else(|| format!("unsupported bit width {}; expected 8, 16, 32 or 64", bits))
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> Self {
        width.bits()
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Two's-complement signed or plain unsigned interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    pub fn from_signed(signed: bool) -> Self {
        if signed {
            Self::Signed
        } else {
            Self::Unsigned
        }
    }
}

/// A fixed-width integer type such as `int8_t` or `uint32_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntType {
    pub width: BitWidth,
    pub signedness: Signedness,
}

impl IntType {
    /// C's `int` on the targets the fixtures are written for
    pub const C_INT: IntType = IntType::signed(BitWidth::W32);

    pub const fn new(width: BitWidth, signedness: Signedness) -> Self {
        Self { width, signedness }
    }

    pub const fn signed(width: BitWidth) -> Self {
        Self::new(width, Signedness::Signed)
    }

    pub const fn unsigned(width: BitWidth) -> Self {
        Self::new(width, Signedness::Unsigned)
    }

    pub fn is_signed(&self) -> bool {
        self.signedness == Signedness::Signed
    }

    pub fn bits(&self) -> u32 {
        self.width.bits()
    }

    /// Smallest representable value
    pub fn min_value(&self) -> i128 {
        if self.is_signed() {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value
    pub fn max_value(&self) -> i128 {
        if self.is_signed() {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    /// Result type of an arithmetic operator over two operands of equal width.
    ///
    /// Mixed signedness yields unsigned, as C does for operands of equal rank.
    pub fn common(lhs: IntType, rhs: IntType) -> IntType {
        debug_assert_eq!(lhs.width, rhs.width);
        if lhs.is_signed() && rhs.is_signed() {
            lhs
        } else {
            IntType::unsigned(lhs.width)
        }
    }

    /// `<stdint.h>` spelling, e.g. `int8_t`
    pub fn c_name(&self) -> String {
        match self.signedness {
            Signedness::Signed => format!("int{}_t", self.bits()),
            Signedness::Unsigned => format!("uint{}_t", self.bits()),
        }
    }

    /// Parse a `<stdint.h>` type name
    pub fn from_c_name(name: &str) -> Option<Self> {
        let (signedness, rest) = match name.strip_prefix('u') {
            Some(rest) => (Signedness::Unsigned, rest),
            None => (Signedness::Signed, name),
        };
        let bits = rest.strip_prefix("int")?.strip_suffix("_t")?;
        let width = BitWidth::from_bits(bits.parse().ok()?)?;
        Some(Self::new(width, signedness))
    }
}

impl fmt::Display for IntType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.c_name())
    }
}

/// Sort of a term: a truth value or a fixed-width bitvector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    Bool,
    BitVec(IntType),
}

impl Sort {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn int_type(&self) -> Option<IntType> {
        match self {
            Self::BitVec(ty) => Some(*ty),
            Self::Bool => None,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::BitVec(ty) => write!(f, "{}", ty),
        }
    }
}

//! Symbolic inputs

use super::types::{BitWidth, IntType, Signedness};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fresh symbolic input, e.g. `int8_t x = crucible_int8_t("x")`.
///
/// Immutable once created; lives for one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolicInt {
    name: String,
    ty: IntType,
}

impl SymbolicInt {
    pub fn new(name: impl Into<String>, width: BitWidth, signedness: Signedness) -> Self {
        Self {
            name: name.into(),
            ty: IntType::new(width, signedness),
        }
    }

    pub fn with_type(name: impl Into<String>, ty: IntType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> IntType {
        self.ty
    }

    pub fn width(&self) -> BitWidth {
        self.ty.width
    }

    pub fn signedness(&self) -> Signedness {
        self.ty.signedness
    }
}

impl fmt::Display for SymbolicInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

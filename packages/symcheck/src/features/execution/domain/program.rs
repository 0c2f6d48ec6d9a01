//! Straight-line program model
//!
//! What a front-end hands to the driver: symbolic-input declarations,
//! assumptions and checks, in source order. Expressions are still untyped
//! here; the driver resolves names and literal types while lowering them to
//! terms.

use crate::errors::Result;
use crate::features::symbolic::{BinOp, BitWidth, IntType, Signedness, UnaryOp};
use crate::shared::models::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-level expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Integer constant. Without `ty` it takes the type of the operand it
    /// meets, or `int32_t` when there is none.
    Int {
        value: i128,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ty: Option<IntType>,
    },

    /// Reference to a declared symbolic input
    Var(String),

    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn int(value: i128) -> Self {
        Self::Int { value, ty: None }
    }

    pub fn typed_int(value: i128, ty: IntType) -> Self {
        Self::Int {
            value,
            ty: Some(ty),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn gt(self, rhs: Expr) -> Self {
        Self::binary(BinOp::Gt, self, rhs)
    }

    pub fn lt(self, rhs: Expr) -> Self {
        Self::binary(BinOp::Lt, self, rhs)
    }

    pub fn equals(self, rhs: Expr) -> Self {
        Self::binary(BinOp::Eq, self, rhs)
    }

    /// Names referenced by this expression, left to right
    pub fn vars(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Int { .. } => {}
            Self::Var(name) => out.push(name),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Self::Unary { operand, .. } => operand.collect_vars(out),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::binary(BinOp::Add, self, rhs)
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::binary(BinOp::Sub, self, rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{}", value),
            Self::Var(name) => f.write_str(name),
            Self::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Self::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
        }
    }
}

/// One program item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    /// Fresh symbolic input
    Declare {
        name: String,
        width: BitWidth,
        signed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<SourceLocation>,
    },

    /// `assuming(expr)`
    Assume {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<SourceLocation>,
    },

    /// `check(expr)`
    Check {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<SourceLocation>,
    },
}

impl Item {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Declare { location, .. }
            | Self::Assume { location, .. }
            | Self::Check { location, .. } => location.as_ref(),
        }
    }

    pub fn is_check(&self) -> bool {
        matches!(self, Self::Check { .. })
    }
}

/// A parsed straight-line program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Declare a symbolic input of type `ty`
    pub fn declare(self, name: impl Into<String>, ty: IntType) -> Self {
        let location = self.next_location();
        self.declare_at(name, ty, location)
    }

    pub fn declare_at(
        mut self,
        name: impl Into<String>,
        ty: IntType,
        location: SourceLocation,
    ) -> Self {
        self.items.push(Item::Declare {
            name: name.into(),
            width: ty.width,
            signed: ty.signedness == Signedness::Signed,
            location: Some(location),
        });
        self
    }

    pub fn assume(self, expr: Expr) -> Self {
        let location = self.next_location();
        self.assume_at(expr, location)
    }

    pub fn assume_at(mut self, expr: Expr, location: SourceLocation) -> Self {
        self.items.push(Item::Assume {
            expr,
            location: Some(location),
        });
        self
    }

    pub fn check(self, expr: Expr) -> Self {
        let location = self.next_location();
        self.check_at(expr, location)
    }

    pub fn check_at(mut self, expr: Expr, location: SourceLocation) -> Self {
        self.items.push(Item::Check {
            expr,
            location: Some(location),
        });
        self
    }

    fn next_location(&self) -> SourceLocation {
        SourceLocation::synthetic(self.name.clone(), self.items.len())
    }

    /// Location of item `index`: its own, or a synthetic one
    pub fn location_of(&self, index: usize) -> SourceLocation {
        self.items
            .get(index)
            .and_then(Item::location)
            .cloned()
            .unwrap_or_else(|| SourceLocation::synthetic(self.name.clone(), index))
    }

    pub fn check_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_check()).count()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Execution driver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// Nothing processed yet
    Init,
    /// Last item was a declaration
    Declaring,
    /// Processing assumptions and checks
    Executing,
    /// End of program reached
    Done,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::Declaring => "declaring",
            Self::Executing => "executing",
            Self::Done => "done",
        })
    }
}

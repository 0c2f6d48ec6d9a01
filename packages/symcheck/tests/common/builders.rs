//! Program builders

use symcheck::features::symbolic::{BitWidth, IntType};
use symcheck::{Expr, Program};

pub const INT8: IntType = IntType::signed(BitWidth::W8);
pub const INT32: IntType = IntType::signed(BitWidth::W32);

/// `x, y, z: ty; assuming(y > 0); check(x + y + z > 0);`
pub fn abdpaper_program(name: &str, ty: IntType) -> Program {
    Program::new(name)
        .declare("x", ty)
        .declare("y", ty)
        .declare("z", ty)
        .assume(Expr::var("y").gt(Expr::int(0)))
        .check((Expr::var("x") + Expr::var("y") + Expr::var("z")).gt(Expr::int(0)))
}

/// `x: ty; assuming(x > 0); check(x + 1 > x);`
pub fn increment_program(ty: IntType) -> Program {
    Program::new(format!("increment-{}", ty))
        .declare("x", ty)
        .assume(Expr::var("x").gt(Expr::int(0)))
        .check((Expr::var("x") + Expr::int(1)).gt(Expr::var("x")))
}

/// `x: ty; assuming(0 < x < 100); check(x + 100 > 0);`
pub fn bounded_sum_program(ty: IntType) -> Program {
    Program::new(format!("bounded-{}", ty))
        .declare("x", ty)
        .assume(Expr::var("x").gt(Expr::int(0)))
        .assume(Expr::var("x").lt(Expr::int(100)))
        .check((Expr::var("x") + Expr::int(100)).gt(Expr::int(0)))
}

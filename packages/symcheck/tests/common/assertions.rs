//! Custom assertions for verdict checking

use symcheck::features::symbolic::{IntType, Witness};
use symcheck::{Verdict, VerdictSummary};

/// Interpret `value` as a `ty` integer (two's-complement wraparound)
pub fn wrap(value: i128, ty: IntType) -> i128 {
    let bits = ty.bits();
    let modulus = 1i128 << bits;
    let mut v = value.rem_euclid(modulus);
    if ty.is_signed() && v >= modulus / 2 {
        v -= modulus;
    }
    v
}

/// Assert the single check of `summary` is disproved and return its witness
pub fn expect_single_disproved(summary: &VerdictSummary) -> &Witness {
    assert_eq!(
        summary.details.len(),
        1,
        "expected one check, got {:?}",
        summary.details
    );
    match &summary.details[0].verdict {
        Verdict::Disproved(witness) => witness,
        other => panic!("expected a counterexample, got {}", other),
    }
}

/// Assert `witness` satisfies `y > 0` and violates `x + y + z > 0` at `ty`
pub fn assert_abdpaper_counterexample(witness: &Witness, ty: IntType) {
    let x = witness.value_of("x").expect("x in witness");
    let y = witness.value_of("y").expect("y in witness");
    let z = witness.value_of("z").expect("z in witness");

    for v in [x, y, z] {
        assert!(
            ty.min_value() <= v && v <= ty.max_value(),
            "{} out of range for {}",
            v,
            ty
        );
    }
    assert!(y > 0, "assumption y > 0 violated by {}", witness);
    let sum = wrap(wrap(x + y, ty) + z, ty);
    assert!(sum <= 0, "x + y + z = {} is positive for {}", sum, witness);
}

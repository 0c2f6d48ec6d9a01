//! Bit-blasting of terms into CNF
//!
//! Every bitvector term becomes a little-endian vector of literals (index 0
//! is the least significant bit). Gates are Tseitin-encoded directly into the
//! SAT core, with constant folding and structural hashing of AND/XOR nodes.
//! Circuit semantics match `symbolic::domain::value` bit for bit, including
//! division by zero and over-wide shifts.

use super::sat::{CdclSolver, Lit, SatOutcome, SatStats};
use crate::features::solver::domain::{SatResult, SolveBudget, SolverError};
use crate::features::symbolic::{
    BinOp, ConcreteValue, OpClass, Sort, SymbolicInt, Term, UnaryOp, Witness,
};
use std::collections::HashMap;

type Bits = Vec<Lit>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Gate {
    And,
    Xor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Left,
    Logical,
    Arithmetic,
}

/// CNF encoder for one query
#[derive(Debug)]
pub struct BitBlaster {
    sat: CdclSolver,
    tru: Lit,
    symbols: Vec<(SymbolicInt, Bits)>,
    gates: HashMap<(Gate, Lit, Lit), Lit>,
}

impl Default for BitBlaster {
    fn default() -> Self {
        Self::new()
    }
}

impl BitBlaster {
    pub fn new() -> Self {
        let mut sat = CdclSolver::new();
        let tru = Lit::pos(sat.new_var());
        sat.add_clause(&[tru]);
        Self {
            sat,
            tru,
            symbols: Vec::new(),
            gates: HashMap::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.sat.num_vars()
    }

    pub fn num_clauses(&self) -> usize {
        self.sat.num_clauses()
    }

    pub fn sat_stats(&self) -> SatStats {
        self.sat.stats()
    }

    /// Symbols encoded so far, in first-occurrence order
    pub fn symbols(&self) -> impl Iterator<Item = &SymbolicInt> {
        self.symbols.iter().map(|(s, _)| s)
    }

    /// Require a boolean term to hold
    pub fn assert_term(&mut self, term: &Term) -> Result<(), SolverError> {
        let lit = self.encode_bool(term)?;
        self.sat.add_clause(&[lit]);
        Ok(())
    }

    /// Decide the asserted terms. On Sat the witness holds every encoded symbol.
    pub fn solve(&mut self, budget: &SolveBudget) -> SatResult {
        match self.sat.solve(budget) {
            SatOutcome::Sat(model) => SatResult::Sat(self.witness(&model)),
            SatOutcome::Unsat => SatResult::Unsat,
            SatOutcome::Timeout => SolverError::Timeout.into(),
            SatOutcome::ConflictLimit => SolverError::ConflictBudget.into(),
        }
    }

    fn witness(&self, model: &[bool]) -> Witness {
        let mut witness = Witness::new();
        for (symbol, bits) in &self.symbols {
            let mut value = 0u64;
            for (i, lit) in bits.iter().enumerate() {
                if model[lit.var().index()] == lit.is_pos() {
                    value |= 1u64 << i;
                }
            }
            witness.insert_value(symbol.clone(), ConcreteValue::from_bits(value, symbol.ty()));
        }
        witness
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Term encoding
    // ═══════════════════════════════════════════════════════════════════════

    fn encode_bool(&mut self, term: &Term) -> Result<Lit, SolverError> {
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
                        self.and2(a, b)
                    } else {
                        self.or2(a, b)
                    })
                }
                OpClass::Comparison if lhs.is_bool() => {
                    let a = self.encode_bool(lhs)?;
                    let b = self.encode_bool(rhs)?;
                    let differ = self.xor2(a, b);
                    Ok(if *op == BinOp::Eq { differ.not() } else { differ })
                }
                OpClass::Comparison => {
                    let signed = Term::comparison_type(lhs, rhs)
                        .map(|ty| ty.is_signed())
                        .ok_or_else(|| not_bitvector(term))?;
                    let a = self.encode_bv(lhs)?;
                    let b = self.encode_bv(rhs)?;
                    Ok(match op {
                        BinOp::Eq => self.eq_bits(&a, &b),
                        BinOp::Ne => self.eq_bits(&a, &b).not(),
                        BinOp::Lt => self.less(&a, &b, signed),
                        BinOp::Gt => self.less(&b, &a, signed),
                        BinOp::Le => self.less(&b, &a, signed).not(),
                        BinOp::Ge => self.less(&a, &b, signed).not(),
                        _ => return Err(not_boolean(term)),
                    })
                }
                OpClass::Arithmetic => Err(not_boolean(term)),
            },
            _ => Err(not_boolean(term)),
        }
    }

    fn encode_bv(&mut self, term: &Term) -> Result<Bits, SolverError> {
        match term {
            Term::Literal(value) => Ok(self.const_bits(value.bits(), value.ty().bits() as usize)),
            Term::Symbol(symbol) => Ok(self.symbol_bits(symbol)),
            Term::UnaryOp { op, operand, .. } => {
                let a = self.encode_bv(operand)?;
                match op {
                    UnaryOp::Neg => Ok(self.negate(&a)),
                    UnaryOp::BitNot => Ok(a.iter().map(|l| l.not()).collect()),
                    UnaryOp::Not => Err(not_bitvector(term)),
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
                    BinOp::Add => self.add(&a, &b),
                    BinOp::Sub => self.sub(&a, &b),
                    BinOp::Mul => self.mul(&a, &b),
                    BinOp::Div if signed => self.sdivrem(&a, &b).0,
                    BinOp::Div => self.udivrem(&a, &b).0,
                    BinOp::Rem if signed => self.sdivrem(&a, &b).1,
                    BinOp::Rem => self.udivrem(&a, &b).1,
                    BinOp::BitAnd => self.zip(&a, &b, Self::and2),
                    BinOp::BitOr => self.zip(&a, &b, Self::or2),
                    BinOp::BitXor => self.zip(&a, &b, Self::xor2),
                    BinOp::Shl => self.shift(&a, &b, Shift::Left),
                    BinOp::Shr if signed => self.shift(&a, &b, Shift::Arithmetic),
                    BinOp::Shr => self.shift(&a, &b, Shift::Logical),
                    _ => return Err(not_bitvector(term)),
                })
            }
            Term::BinOp { .. } => Err(not_bitvector(term)),
        }
    }

    fn symbol_bits(&mut self, symbol: &SymbolicInt) -> Bits {
        if let Some((_, bits)) = self.symbols.iter().find(|(s, _)| s.name() == symbol.name()) {
            return bits.clone();
        }
        let bits: Bits = (0..symbol.ty().bits())
            .map(|_| Lit::pos(self.sat.new_var()))
            .collect();
        self.symbols.push((symbol.clone(), bits.clone()));
        bits
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Gates
    // ═══════════════════════════════════════════════════════════════════════

    fn fls(&self) -> Lit {
        self.tru.not()
    }

    fn fresh(&mut self) -> Lit {
        Lit::pos(self.sat.new_var())
    }

    fn and2(&mut self, a: Lit, b: Lit) -> Lit {
        let fls = self.fls();
        if a == fls || b == fls || a == b.not() {
            return fls;
        }
        if a == self.tru {
            return b;
        }
        if b == self.tru || a == b {
            return a;
        }
        let key = (Gate::And, a.min(b), a.max(b));
        if let Some(&g) = self.gates.get(&key) {
            return g;
        }
        let g = self.fresh();
        self.sat.add_clause(&[g.not(), a]);
        self.sat.add_clause(&[g.not(), b]);
        self.sat.add_clause(&[g, a.not(), b.not()]);
        self.gates.insert(key, g);
        g
    }

    fn or2(&mut self, a: Lit, b: Lit) -> Lit {
        self.and2(a.not(), b.not()).not()
    }

    fn xor2(&mut self, a: Lit, b: Lit) -> Lit {
        let fls = self.fls();
        if a == fls {
            return b;
        }
        if b == fls {
            return a;
        }
        if a == self.tru {
            return b.not();
        }
        if b == self.tru {
            return a.not();
        }
        if a == b {
            return fls;
        }
        if a == b.not() {
            return self.tru;
        }
        let key = (Gate::Xor, a.min(b), a.max(b));
        if let Some(&g) = self.gates.get(&key) {
            return g;
        }
        let g = self.fresh();
        self.sat.add_clause(&[g.not(), a, b]);
        self.sat.add_clause(&[g.not(), a.not(), b.not()]);
        self.sat.add_clause(&[g, a.not(), b]);
        self.sat.add_clause(&[g, a, b.not()]);
        self.gates.insert(key, g);
        g
    }

    /// `c ? t : e`
    fn mux(&mut self, c: Lit, t: Lit, e: Lit) -> Lit {
        if c == self.tru || t == e {
            return t;
        }
        if c == self.fls() {
            return e;
        }
        let on = self.and2(c, t);
        let off = self.and2(c.not(), e);
        self.or2(on, off)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Word-level circuits
    // ═══════════════════════════════════════════════════════════════════════

    fn const_bits(&self, value: u64, width: usize) -> Bits {
        (0..width)
            .map(|i| if value >> i & 1 == 1 { self.tru } else { self.fls() })
            .collect()
    }

    fn zip(&mut self, a: &[Lit], b: &[Lit], gate: fn(&mut Self, Lit, Lit) -> Lit) -> Bits {
        a.iter().zip(b).map(|(&x, &y)| gate(self, x, y)).collect()
    }

    fn mux_bits(&mut self, c: Lit, t: &[Lit], e: &[Lit]) -> Bits {
        t.iter().zip(e).map(|(&x, &y)| self.mux(c, x, y)).collect()
    }

    /// Ripple-carry adder; returns the sum and the carry out
    fn add_with_carry(&mut self, a: &[Lit], b: &[Lit], carry_in: Lit) -> (Bits, Lit) {
        let mut carry = carry_in;
        let mut sum = Vec::with_capacity(a.len());
        for (&x, &y) in a.iter().zip(b) {
            let half = self.xor2(x, y);
            sum.push(self.xor2(half, carry));
            let generate = self.and2(x, y);
            let propagate = self.and2(half, carry);
            carry = self.or2(generate, propagate);
        }
        (sum, carry)
    }

    fn add(&mut self, a: &[Lit], b: &[Lit]) -> Bits {
        let fls = self.fls();
        self.add_with_carry(a, b, fls).0
    }

    fn sub(&mut self, a: &[Lit], b: &[Lit]) -> Bits {
        let not_b: Bits = b.iter().map(|l| l.not()).collect();
        let tru = self.tru;
        self.add_with_carry(a, &not_b, tru).0
    }

    fn negate(&mut self, a: &[Lit]) -> Bits {
        let zero = self.const_bits(0, a.len());
        self.sub(&zero, a)
    }

    fn mul(&mut self, a: &[Lit], b: &[Lit]) -> Bits {
        let w = a.len();
        let fls = self.fls();
        let mut acc = self.const_bits(0, w);
        for i in 0..w {
            if b[i] == fls {
                continue;
            }
            let partial: Bits = (0..w)
                .map(|j| if j < i { fls } else { self.and2(a[j - i], b[i]) })
                .collect();
            acc = self.add(&acc, &partial);
        }
        acc
    }

    /// a < b
    fn less(&mut self, a: &[Lit], b: &[Lit], signed: bool) -> Lit {
        if signed {
            // flipping the sign bits maps signed order onto unsigned order
            let w = a.len();
            let mut a = a.to_vec();
            let mut b = b.to_vec();
            a[w - 1] = a[w - 1].not();
            b[w - 1] = b[w - 1].not();
            self.ult(&a, &b)
        } else {
            self.ult(a, b)
        }
    }

    fn ult(&mut self, a: &[Lit], b: &[Lit]) -> Lit {
        // a - b borrows exactly when a < b
        let not_b: Bits = b.iter().map(|l| l.not()).collect();
        let tru = self.tru;
        self.add_with_carry(a, &not_b, tru).1.not()
    }

    fn eq_bits(&mut self, a: &[Lit], b: &[Lit]) -> Lit {
        let mut all = self.tru;
        for (&x, &y) in a.iter().zip(b) {
            let same = self.xor2(x, y).not();
            all = self.and2(all, same);
        }
        all
    }

    /// Restoring division. Division by zero yields all ones and the dividend.
    fn udivrem(&mut self, a: &[Lit], b: &[Lit]) -> (Bits, Bits) {
        let w = a.len();
        let fls = self.fls();
        let tru = self.tru;
        let not_b: Bits = b.iter().map(|l| l.not()).chain([tru]).collect();
        let mut rem: Bits = vec![fls; w + 1];
        let mut quotient: Bits = vec![fls; w];

        for i in (0..w).rev() {
            // the remainder stays below 2^w, so the dropped top bit is zero
            rem.pop();
            rem.insert(0, a[i]);
            let (diff, fits) = self.add_with_carry(&rem, &not_b, tru);
            quotient[i] = fits;
            rem = self.mux_bits(fits, &diff, &rem);
        }
        rem.truncate(w);
        (quotient, rem)
    }

    /// Signed division truncating toward zero; remainder takes the dividend's sign
    fn sdivrem(&mut self, a: &[Lit], b: &[Lit]) -> (Bits, Bits) {
        let w = a.len();
        let a_neg = a[w - 1];
        let b_neg = b[w - 1];
        let neg_a = self.negate(a);
        let neg_b = self.negate(b);
        let abs_a = self.mux_bits(a_neg, &neg_a, a);
        let abs_b = self.mux_bits(b_neg, &neg_b, b);
        let (q, r) = self.udivrem(&abs_a, &abs_b);

        let flip = self.xor2(a_neg, b_neg);
        let neg_q = self.negate(&q);
        let neg_r = self.negate(&r);
        let quotient = self.mux_bits(flip, &neg_q, &q);
        let remainder = self.mux_bits(a_neg, &neg_r, &r);
        (quotient, remainder)
    }

    /// Barrel shifter; amounts of at least the width saturate
    fn shift(&mut self, a: &[Lit], amount: &[Lit], kind: Shift) -> Bits {
        let w = a.len();
        let stages = w.trailing_zeros() as usize;
        let fill = match kind {
            Shift::Arithmetic => a[w - 1],
            Shift::Left | Shift::Logical => self.fls(),
        };

        let mut current = a.to_vec();
        for (stage, &select) in amount.iter().enumerate().take(stages) {
            let dist = 1usize << stage;
            let shifted: Bits = (0..w)
                .map(|k| match kind {
                    Shift::Left if k >= dist => current[k - dist],
                    Shift::Left => fill,
                    _ if k + dist < w => current[k + dist],
                    _ => fill,
                })
                .collect();
            current = self.mux_bits(select, &shifted, &current);
        }

        let mut overflow = self.fls();
        for &bit in &amount[stages..] {
            overflow = self.or2(overflow, bit);
        }
        let saturated = vec![fill; w];
        self.mux_bits(overflow, &saturated, &current)
    }
}

fn not_boolean(term: &Term) -> SolverError {
    SolverError::Encoding(format!("expected a boolean term, found {}", term))
}

fn not_bitvector(term: &Term) -> SolverError {
    SolverError::Encoding(format!("expected a bitvector term, found {}", term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::{eval_arith, BitWidth, IntType, Signedness, Value};

    fn sym(name: &str, ty: IntType) -> Term {
        Term::symbol(SymbolicInt::with_type(name, ty))
    }

    fn lit(value: i128, ty: IntType) -> Term {
        Term::literal(value, ty).unwrap()
    }

    fn eq(lhs: Term, rhs: Term) -> Term {
        Term::binary(BinOp::Eq, lhs, rhs).unwrap()
    }

    /// Solve `x == a ∧ y == b ∧ (x op y) == expected`
    fn circuit_agrees(op: BinOp, a: u64, b: u64, expected: u64, ty: IntType) -> SatResult {
        let x = sym("x", ty);
        let y = sym("y", ty);
        let mut blaster = BitBlaster::new();
        blaster
            .assert_term(&eq(x.clone(), Term::Literal(ConcreteValue::from_bits(a, ty))))
            .unwrap();
        blaster
            .assert_term(&eq(y.clone(), Term::Literal(ConcreteValue::from_bits(b, ty))))
            .unwrap();
        let applied = Term::binary(op, x, y).unwrap();
        blaster
            .assert_term(&eq(applied, Term::Literal(ConcreteValue::from_bits(expected, ty))))
            .unwrap();
        blaster.solve(&SolveBudget::unlimited())
    }

    #[test]
    fn test_arithmetic_circuits_match_concrete_semantics() {
        let samples: [u64; 8] = [0, 1, 2, 7, 0x7f, 0x80, 0xfe, 0xff];
        let ops = [
            BinOp::Add,
            BinOp::Sub,
            BinOp::Mul,
            BinOp::Div,
            BinOp::Rem,
            BinOp::BitAnd,
            BinOp::BitOr,
            BinOp::BitXor,
            BinOp::Shl,
            BinOp::Shr,
        ];
        for signedness in [Signedness::Signed, Signedness::Unsigned] {
            let ty = IntType::new(BitWidth::W8, signedness);
            for op in ops {
                for &a in &samples {
                    for &b in &samples {
                        let expected = eval_arith(op, a, b, ty).unwrap();
                        assert!(
                            circuit_agrees(op, a, b, expected, ty).is_sat(),
                            "{} {} {} should be {} ({})",
                            a,
                            op,
                            b,
                            expected,
                            ty
                        );
                        let wrong = expected.wrapping_add(1) & 0xff;
                        assert!(
                            circuit_agrees(op, a, b, wrong, ty).is_unsat(),
                            "{} {} {} must not be {} ({})",
                            a,
                            op,
                            b,
                            wrong,
                            ty
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_signed_comparison() {
        let ty = IntType::signed(BitWidth::W8);
        let x = sym("x", ty);
        let mut blaster = BitBlaster::new();
        // x < 0 && x > -2  =>  x == -1
        let lt = Term::binary(BinOp::Lt, x.clone(), lit(0, ty)).unwrap();
        let gt = Term::binary(BinOp::Gt, x, lit(-2, ty)).unwrap();
        blaster.assert_term(&lt).unwrap();
        blaster.assert_term(&gt).unwrap();
        match blaster.solve(&SolveBudget::unlimited()) {
            SatResult::Sat(w) => assert_eq!(w.value_of("x"), Some(-1)),
            other => panic!("expected sat, got {:?}", other),
        }
    }

    #[test]
    fn test_unsigned_comparison() {
        let ty = IntType::unsigned(BitWidth::W8);
        let x = sym("x", ty);
        let mut blaster = BitBlaster::new();
        let gt = Term::binary(BinOp::Gt, x, lit(254, ty)).unwrap();
        blaster.assert_term(&gt).unwrap();
        match blaster.solve(&SolveBudget::unlimited()) {
            SatResult::Sat(w) => assert_eq!(w.value_of("x"), Some(255)),
            other => panic!("expected sat, got {:?}", other),
        }
    }

    #[test]
    fn test_overflow_witness_satisfies_formula() {
        // x > 0 && !(x + 1 > x) only holds at INT8_MAX
        let ty = IntType::signed(BitWidth::W8);
        let x = sym("x", ty);
        let inc = Term::binary(BinOp::Add, x.clone(), lit(1, ty)).unwrap();
        let grows = Term::binary(BinOp::Gt, inc, x.clone()).unwrap();
        let positive = Term::binary(BinOp::Gt, x, lit(0, ty)).unwrap();

        let mut blaster = BitBlaster::new();
        blaster.assert_term(&positive).unwrap();
        blaster.assert_term(&grows.clone().negate().unwrap()).unwrap();
        let witness = match blaster.solve(&SolveBudget::unlimited()) {
            SatResult::Sat(w) => w,
            other => panic!("expected sat, got {:?}", other),
        };
        assert_eq!(witness.value_of("x"), Some(127));
        assert_eq!(grows.evaluate(&witness), Some(Value::Bool(false)));
    }

    #[test]
    fn test_logical_connectives_and_bool_equality() {
        let ty = IntType::signed(BitWidth::W8);
        let x = sym("x", ty);
        let a = Term::binary(BinOp::Eq, x.clone(), lit(3, ty)).unwrap();
        let b = Term::binary(BinOp::Eq, x, lit(4, ty)).unwrap();
        let both = Term::binary(BinOp::And, a.clone(), b.clone()).unwrap();

        let mut blaster = BitBlaster::new();
        blaster.assert_term(&both).unwrap();
        assert!(blaster.solve(&SolveBudget::unlimited()).is_unsat());

        let mut blaster = BitBlaster::new();
        let either = Term::binary(BinOp::Or, a.clone(), b.clone()).unwrap();
        let same = Term::binary(BinOp::Eq, a, b).unwrap();
        blaster.assert_term(&either).unwrap();
        blaster.assert_term(&same).unwrap();
        assert!(blaster.solve(&SolveBudget::unlimited()).is_unsat());
    }

    #[test]
    fn test_symbols_encoded_once() {
        let ty = IntType::signed(BitWidth::W32);
        let x = sym("x", ty);
        let sum = Term::binary(BinOp::Add, x.clone(), x.clone()).unwrap();
        let mut blaster = BitBlaster::new();
        blaster.assert_term(&eq(sum, lit(10, ty))).unwrap();
        assert_eq!(blaster.symbols().count(), 1);
        let w = match blaster.solve(&SolveBudget::unlimited()) {
            SatResult::Sat(w) => w,
            other => panic!("expected sat, got {:?}", other),
        };
        let x = w.value_of("x").unwrap();
        assert!(x == 5 || x == 5 - (1i128 << 31));
    }

    #[test]
    fn test_non_boolean_assertion_rejected() {
        let ty = IntType::signed(BitWidth::W8);
        let mut blaster = BitBlaster::new();
        let err = blaster.assert_term(&sym("x", ty)).unwrap_err();
        assert!(matches!(err, SolverError::Encoding(_)));
    }
}

//! CDCL SAT core
//!
//! Conflict-driven clause learning over the CNF produced by the bit-blaster:
//!
//! - two watched literals per clause; position 0 holds the implied literal
//!   of a reason clause
//! - first-UIP conflict analysis with non-chronological backjumping
//! - VSIDS branching over a lazily updated binary heap, with phase saving
//! - Luby restarts
//! - deadline and conflict budget checked during search

use crate::features::solver::domain::SolveBudget;
use std::collections::BinaryHeap;

/// Boolean variable (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Variable or its negation, encoded as `var << 1 | negated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(u32);

impl Lit {
    #[inline]
    pub fn pos(var: Var) -> Self {
        Lit(var.0 << 1)
    }

    #[inline]
    pub fn new(var: Var, positive: bool) -> Self {
        Lit(var.0 << 1 | u32::from(!positive))
    }

    #[inline]
    pub fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    #[inline]
    pub fn is_pos(self) -> bool {
        self.0 & 1 == 0
    }

    #[inline]
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Lit(self.0 ^ 1)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of `CdclSolver::solve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatOutcome {
    /// Satisfying assignment indexed by variable
    Sat(Vec<bool>),
    Unsat,
    /// Deadline reached
    Timeout,
    /// Conflict budget reached
    ConflictLimit,
}

/// Search counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatStats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub restarts: u64,
    pub learned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClauseRef(u32);

#[derive(Debug, Clone)]
struct Clause {
    lits: Vec<Lit>,
}

const VAR_DECAY: f64 = 0.95;
const RESCALE_LIMIT: f64 = 1e100;
const RESTART_BASE: u64 = 100;
const DEADLINE_POLL: u64 = 256;

#[inline]
fn value_of(assigns: &[Option<bool>], lit: Lit) -> Option<bool> {
    assigns[lit.var().index()].map(|v| v == lit.is_pos())
}

/// i-th element (1-based) of the Luby sequence 1 1 2 1 1 2 4 ...
fn luby(i: u64) -> u64 {
    let mut size = 1u64;
    let mut seq = 0u32;
    while size < i + 1 {
        seq += 1;
        size = 2 * size + 1;
    }
    let mut x = i;
    while size - 1 != x {
        size = (size - 1) >> 1;
        seq -= 1;
        x %= size;
    }
    1u64 << seq
}

/// CDCL solver over a growable variable set
#[derive(Debug, Default)]
pub struct CdclSolver {
    clauses: Vec<Clause>,
    watches: Vec<Vec<ClauseRef>>,
    assigns: Vec<Option<bool>>,
    level: Vec<u32>,
    reason: Vec<Option<ClauseRef>>,
    phase: Vec<bool>,
    seen: Vec<bool>,
    activity: Vec<f64>,
    var_inc: f64,
    order: BinaryHeap<(u64, Var)>,
    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    qhead: usize,
    /// False once an empty clause was derived at level 0
    ok: bool,
    stats: SatStats,
}

impl CdclSolver {
    pub fn new() -> Self {
        Self {
            var_inc: 1.0,
            ok: true,
            ..Self::default()
        }
    }

    pub fn new_var(&mut self) -> Var {
        let var = Var(self.assigns.len() as u32);
        self.assigns.push(None);
        self.level.push(0);
        self.reason.push(None);
        self.phase.push(false);
        self.seen.push(false);
        self.activity.push(0.0);
        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
        self.order.push((0f64.to_bits(), var));
        var
    }

    pub fn num_vars(&self) -> usize {
        self.assigns.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn stats(&self) -> SatStats {
        self.stats
    }

    fn decision_level(&self) -> u32 {
        self.trail_lim.len() as u32
    }

    fn value(&self, lit: Lit) -> Option<bool> {
        value_of(&self.assigns, lit)
    }

    fn assign(&mut self, lit: Lit, reason: Option<ClauseRef>) {
        let v = lit.var().index();
        self.assigns[v] = Some(lit.is_pos());
        self.level[v] = self.decision_level();
        self.reason[v] = reason;
        self.trail.push(lit);
    }

    /// Add an input clause. Must be called at decision level 0.
    ///
    /// Returns `false` once the formula is known to be unsatisfiable.
    pub fn add_clause(&mut self, lits: &[Lit]) -> bool {
        if !self.ok {
            return false;
        }
        let mut lits = lits.to_vec();
        lits.sort_unstable();
        lits.dedup();

        let mut kept = Vec::with_capacity(lits.len());
        for (i, &lit) in lits.iter().enumerate() {
            // sorted, so a complementary pair is adjacent
            if i + 1 < lits.len() && lits[i + 1] == lit.not() {
                return true;
            }
            match self.value(lit) {
                Some(true) => return true,
                Some(false) => {}
                None => kept.push(lit),
            }
        }

        match kept.len() {
            0 => {
                self.ok = false;
                false
            }
            1 => {
                self.assign(kept[0], None);
                true
            }
            _ => {
                self.attach(kept);
                true
            }
        }
    }

    fn attach(&mut self, lits: Vec<Lit>) -> ClauseRef {
        let cref = ClauseRef(self.clauses.len() as u32);
        self.watches[lits[0].index()].push(cref);
        self.watches[lits[1].index()].push(cref);
        self.clauses.push(Clause { lits });
        cref
    }

    /// Unit propagation; returns the conflicting clause if any
    fn propagate(&mut self) -> Option<ClauseRef> {
        while self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            self.stats.propagations += 1;

            let false_lit = p.not();
            let mut ws = std::mem::take(&mut self.watches[false_lit.index()]);
            let mut i = 0;
            let mut j = 0;
            let mut conflict = None;

            while i < ws.len() {
                let cref = ws[i];
                i += 1;

                let mut moved_to = None;
                let first = {
                    let lits = &mut self.clauses[cref.0 as usize].lits;
                    if lits[0] == false_lit {
                        lits.swap(0, 1);
                    }
                    let first = lits[0];
                    if value_of(&self.assigns, first) != Some(true) {
                        for k in 2..lits.len() {
                            if value_of(&self.assigns, lits[k]) != Some(false) {
                                lits.swap(1, k);
                                moved_to = Some(lits[1]);
                                break;
                            }
                        }
                    }
                    first
                };

                if let Some(watch) = moved_to {
                    self.watches[watch.index()].push(cref);
                    continue;
                }

                ws[j] = cref;
                j += 1;
                match value_of(&self.assigns, first) {
                    Some(true) => {}
                    Some(false) => {
                        conflict = Some(cref);
                        while i < ws.len() {
                            ws[j] = ws[i];
                            j += 1;
                            i += 1;
                        }
                    }
                    None => self.assign(first, Some(cref)),
                }
            }

            ws.truncate(j);
            let added = std::mem::replace(&mut self.watches[false_lit.index()], ws);
            self.watches[false_lit.index()].extend(added);

            if conflict.is_some() {
                self.qhead = self.trail.len();
                return conflict;
            }
        }
        None
    }

    /// First-UIP analysis. Returns the learned clause (asserting literal
    /// first) and the level to backjump to.
    fn analyze(&mut self, conflict: ClauseRef) -> (Vec<Lit>, u32) {
        let current = self.decision_level();
        let mut learnt = vec![Lit(0)];
        let mut pending = 0usize;
        let mut index = self.trail.len();
        let mut cref = conflict;
        let mut skip_first = false;

        loop {
            let start = usize::from(skip_first);
            for k in start..self.clauses[cref.0 as usize].lits.len() {
                let q = self.clauses[cref.0 as usize].lits[k];
                let v = q.var().index();
                if !self.seen[v] && self.level[v] > 0 {
                    self.seen[v] = true;
                    self.bump(q.var());
                    if self.level[v] >= current {
                        pending += 1;
                    } else {
                        learnt.push(q);
                    }
                }
            }

            // next marked literal on the trail
            loop {
                index -= 1;
                if self.seen[self.trail[index].var().index()] {
                    break;
                }
            }
            let p = self.trail[index];
            self.seen[p.var().index()] = false;
            pending -= 1;

            if pending == 0 {
                learnt[0] = p.not();
                break;
            }
            match self.reason[p.var().index()] {
                Some(r) => {
                    cref = r;
                    skip_first = true;
                }
                None => {
                    learnt[0] = p.not();
                    break;
                }
            }
        }

        for lit in &learnt[1..] {
            self.seen[lit.var().index()] = false;
        }

        let mut backjump = 0;
        if learnt.len() > 1 {
            let mut max_i = 1;
            for k in 2..learnt.len() {
                if self.level[learnt[k].var().index()] > self.level[learnt[max_i].var().index()] {
                    max_i = k;
                }
            }
            learnt.swap(1, max_i);
            backjump = self.level[learnt[1].var().index()];
        }
        (learnt, backjump)
    }

    fn backtrack(&mut self, level: u32) {
        if self.decision_level() <= level {
            return;
        }
        let limit = self.trail_lim[level as usize];
        while self.trail.len() > limit {
            if let Some(lit) = self.trail.pop() {
                let var = lit.var();
                let v = var.index();
                self.assigns[v] = None;
                self.reason[v] = None;
                self.phase[v] = lit.is_pos();
                self.order.push((self.activity[v].to_bits(), var));
            }
        }
        self.trail_lim.truncate(level as usize);
        self.qhead = self.trail.len();
    }

    fn bump(&mut self, var: Var) {
        let v = var.index();
        self.activity[v] += self.var_inc;
        if self.activity[v] > RESCALE_LIMIT {
            for a in &mut self.activity {
                *a *= 1.0 / RESCALE_LIMIT;
            }
            self.var_inc *= 1.0 / RESCALE_LIMIT;
            self.rebuild_order();
        } else if self.assigns[v].is_none() {
            self.order.push((self.activity[v].to_bits(), var));
        }
    }

    fn rebuild_order(&mut self) {
        self.order = (0..self.assigns.len())
            .filter(|&v| self.assigns[v].is_none())
            .map(|v| (self.activity[v].to_bits(), Var(v as u32)))
            .collect();
    }

    /// Highest-activity unassigned variable, skipping stale heap entries
    fn pick_branch(&mut self) -> Option<Lit> {
        if self.order.len() > 4 * self.assigns.len() + 64 {
            self.rebuild_order();
        }
        while let Some((key, var)) = self.order.pop() {
            let v = var.index();
            if self.assigns[v].is_none() && key == self.activity[v].to_bits() {
                return Some(Lit::new(var, self.phase[v]));
            }
        }
        None
    }

    fn learn(&mut self, learnt: Vec<Lit>) {
        self.stats.learned += 1;
        let asserting = learnt[0];
        if learnt.len() == 1 {
            self.assign(asserting, None);
        } else {
            let cref = self.attach(learnt);
            self.assign(asserting, Some(cref));
        }
    }

    /// Decide the clauses added so far within `budget`
    pub fn solve(&mut self, budget: &SolveBudget) -> SatOutcome {
        if !self.ok {
            return SatOutcome::Unsat;
        }
        if budget.expired() {
            return SatOutcome::Timeout;
        }
        if budget.conflicts_exhausted(self.stats.conflicts) {
            return SatOutcome::ConflictLimit;
        }

        let mut restart_round = 0u64;
        let mut restart_limit = RESTART_BASE * luby(restart_round);
        let mut since_restart = 0u64;

        loop {
            if let Some(conflict) = self.propagate() {
                self.stats.conflicts += 1;
                since_restart += 1;
                if self.decision_level() == 0 {
                    self.ok = false;
                    return SatOutcome::Unsat;
                }

                let (learnt, backjump) = self.analyze(conflict);
                self.backtrack(backjump);
                self.learn(learnt);
                self.var_inc /= VAR_DECAY;

                if budget.conflicts_exhausted(self.stats.conflicts) {
                    self.backtrack(0);
                    return SatOutcome::ConflictLimit;
                }
                if self.stats.conflicts % DEADLINE_POLL == 0 && budget.expired() {
                    self.backtrack(0);
                    return SatOutcome::Timeout;
                }
                continue;
            }

            if since_restart >= restart_limit {
                self.stats.restarts += 1;
                restart_round += 1;
                restart_limit = RESTART_BASE * luby(restart_round);
                since_restart = 0;
                self.backtrack(0);
                continue;
            }

            if self.stats.decisions % DEADLINE_POLL == 0 && budget.expired() {
                self.backtrack(0);
                return SatOutcome::Timeout;
            }

            match self.pick_branch() {
                Some(lit) => {
                    self.stats.decisions += 1;
                    self.trail_lim.push(self.trail.len());
                    self.assign(lit, None);
                }
                None => {
                    let model = self.assigns.iter().map(|a| a.unwrap_or(false)).collect();
                    return SatOutcome::Sat(model);
                }
            }
        }
    }
}

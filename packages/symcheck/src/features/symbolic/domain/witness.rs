//! Concrete assignments to symbolic inputs

use super::symbol::SymbolicInt;
use super::value::ConcreteValue;
use std::collections::BTreeMap;
use std::fmt;

/// Assignment of concrete values to symbols, in insertion order.
///
/// Produced by a solver backend on `Sat`; used as the counterexample of a
/// disproved check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    entries: Vec<(SymbolicInt, ConcreteValue)>,
}

impl Witness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` (wrapped to the symbol's width) to `symbol`,
    /// replacing any earlier assignment.
    pub fn insert(&mut self, symbol: SymbolicInt, value: i128) {
        let value = ConcreteValue::wrapping_from_i128(value, symbol.ty());
        self.insert_value(symbol, value);
    }

    /// Assign an already-typed value
    pub fn insert_value(&mut self, symbol: SymbolicInt, value: ConcreteValue) {
        let value = value.reinterpret(symbol.ty());
        match self.entries.iter_mut().find(|(s, _)| s.name() == symbol.name()) {
            Some(entry) => *entry = (symbol, value),
            None => self.entries.push((symbol, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<ConcreteValue> {
        self.entries
            .iter()
            .find(|(s, _)| s.name() == name)
            .map(|(_, v)| *v)
    }

    /// Integer value of `name` under its declared signedness
    pub fn value_of(&self, name: &str) -> Option<i128> {
        self.get(name).map(|v| v.to_i128())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolicInt, &ConcreteValue)> {
        self.entries.iter().map(|(s, v)| (s, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name → integer map for machine-readable output
    pub fn to_map(&self) -> BTreeMap<String, i128> {
        self.entries
            .iter()
            .map(|(s, v)| (s.name().to_string(), v.to_i128()))
            .collect()
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(s, v)| format!("{} = {}", s.name(), v))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::domain::types::{BitWidth, Signedness};

    #[test]
    fn test_insert_wraps_and_replaces() {
        let x = SymbolicInt::new("x", BitWidth::W8, Signedness::Signed);
        let mut w = Witness::new();
        w.insert(x.clone(), 200);
        assert_eq!(w.value_of("x"), Some(-56));

        w.insert(x, -3);
        assert_eq!(w.len(), 1);
        assert_eq!(w.value_of("x"), Some(-3));
    }

    #[test]
    fn test_display_keeps_insertion_order() {
        let mut w = Witness::new();
        w.insert(SymbolicInt::new("z", BitWidth::W8, Signedness::Signed), -128);
        w.insert(SymbolicInt::new("a", BitWidth::W8, Signedness::Unsigned), 255);
        assert_eq!(w.to_string(), "z = -128, a = 255");
        assert_eq!(w.to_map().get("a"), Some(&255));
    }
}

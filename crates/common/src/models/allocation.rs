use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Asset symbol to portfolio fraction, in the order the symbols were first seen.
///
/// Fractions are conventionally in `[0, 1]` but are not required to sum to one.
/// Re-inserting a symbol keeps its original position and replaces the value,
/// which is how a JSON object with a repeated key is read as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationVector {
    entries: Vec<(String, f64)>,
}

impl AllocationVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, fraction: f64) {
        let symbol = symbol.into();
        match self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            Some(entry) => entry.1 = fraction,
            None => self.entries.push((symbol, fraction)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, fraction)| *fraction)
    }

    /// Fraction held in `symbol`, zero when the symbol is absent.
    pub fn fraction(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(s, f)| (s.as_str(), *f))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, f)| *f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AllocationVector {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (symbol, fraction) in iter {
            vector.insert(symbol, fraction);
        }
        vector
    }
}

impl Serialize for AllocationVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, fraction) in &self.entries {
            map.serialize_entry(symbol, fraction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AllocationVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AllocationVisitor;

        impl<'de> Visitor<'de> for AllocationVisitor {
            type Value = AllocationVector;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of asset symbol to fraction")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut vector = AllocationVector::new();
                while let Some((symbol, fraction)) = access.next_entry::<String, f64>()? {
                    vector.insert(symbol, fraction);
                }
                Ok(vector)
            }
        }

        deserializer.deserialize_map(AllocationVisitor)
    }
}

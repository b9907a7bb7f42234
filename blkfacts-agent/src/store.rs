//! Flat fact store.
//!
//! A string-keyed map of scalar values. On a name collision the higher
//! weight wins; equal weights take the later write. Consumers only ever
//! see the winning value.

use crate::facts::{Fact, FactValue};
use std::collections::BTreeMap;

/// Read side of the store, all the reassembler needs.
pub trait FactLookup {
    fn fact(&self, name: &str) -> Option<&FactValue>;

    fn has_fact(&self, name: &str) -> bool {
        self.fact(name).is_some()
    }
}

#[derive(Debug, Clone)]
struct StoredFact {
    value: FactValue,
    weight: i64,
}

/// In-memory fact store.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: BTreeMap<String, StoredFact>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: FactValue, weight: i64) {
        if let Some(existing) = self.facts.get(name) {
            if existing.weight > weight {
                return;
            }
        }
        self.facts
            .insert(name.to_string(), StoredFact { value, weight });
    }

    /// Commits a batch of facts from one collection cycle.
    pub fn commit(&mut self, facts: Vec<Fact>) {
        for fact in facts {
            self.set(&fact.name, fact.value, fact.weight);
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Facts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue, i64)> {
        self.facts
            .iter()
            .map(|(name, stored)| (name.as_str(), &stored.value, stored.weight))
    }
}

impl FactLookup for FactStore {
    fn fact(&self, name: &str) -> Option<&FactValue> {
        self.facts.get(name).map(|stored| &stored.value)
    }
}

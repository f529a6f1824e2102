//! Monster knowledge: which signs and potions work against a monster.

use serde::{Deserialize, Serialize};

/// Ordered set of labels, deduplicated on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label` unless already present. Returns true if it was added.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Returns true when `label` is in the set.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|known| known == label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when the set is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }
}

/// Kind of countermeasure recorded against a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Countermeasure {
    /// A witcher sign; permanent knowledge, never consumed.
    Sign,
    /// A potion; one unit is consumed per encounter.
    Potion,
}

/// Everything known to work against one monster. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestiaryEntry {
    signs: LabelSet,
    potions: LabelSet,
}

impl BestiaryEntry {
    /// Entry holding a single countermeasure.
    pub fn with(kind: Countermeasure, label: impl Into<String>) -> Self {
        let mut entry = Self::default();
        entry.learn(kind, label);
        entry
    }

    /// Record a countermeasure. Returns false if it was already known.
    pub fn learn(&mut self, kind: Countermeasure, label: impl Into<String>) -> bool {
        match kind {
            Countermeasure::Sign => self.signs.insert(label),
            Countermeasure::Potion => self.potions.insert(label),
        }
    }

    /// Effective signs.
    pub fn signs(&self) -> &LabelSet {
        &self.signs
    }

    /// Effective potions.
    pub fn potions(&self) -> &LabelSet {
        &self.potions
    }

    /// Signs and potions merged into one lexically sorted list.
    pub fn countermeasures(&self) -> Vec<&str> {
        let mut merged: Vec<&str> = self.potions.iter().chain(self.signs.iter()).collect();
        merged.sort_unstable();
        merged
    }
}

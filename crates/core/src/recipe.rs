//! Potion recipes and the ingredient requirements they list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Non-negative amount of an ingredient, trophy or brewed potion.
pub type Quantity = u32;

/// A named amount: one entry of a recipe, loot bundle or trade list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    /// Ingredient or trophy name.
    pub name: String,
    /// Amount required or delivered.
    pub count: Quantity,
}

impl Requirement {
    /// Create a requirement.
    pub fn new(name: impl Into<String>, count: Quantity) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Collapse repeated names into one requirement each, summing their counts.
///
/// First-seen order is kept. Trades and brews validate against the totals so
/// a list naming the same item twice cannot overdraw it.
pub fn tally(requirements: &[Requirement]) -> Vec<Requirement> {
    let mut totals: Vec<Requirement> = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        match totals.iter_mut().find(|total| total.name == requirement.name) {
            Some(total) => total.count = total.count.saturating_add(requirement.count),
            None => totals.push(requirement.clone()),
        }
    }
    totals
}

/// Formula display order: larger counts first, then names ascending.
pub fn formula_order(a: &Requirement, b: &Requirement) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name))
}

/// A learned potion formula plus the number of that potion currently held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    requirements: Vec<Requirement>,
    brewed: Quantity,
}

impl Recipe {
    /// Create a recipe nobody has brewed yet. Requirement order is kept as given.
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self {
            requirements,
            brewed: 0,
        }
    }

    /// Requirements in the order they were learned.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Number of potions of this kind currently held.
    pub fn brewed(&self) -> Quantity {
        self.brewed
    }

    /// Record one freshly brewed potion.
    pub fn record_brew(&mut self) {
        self.brewed = self.brewed.saturating_add(1);
    }

    /// Use up one potion. Returns false (and changes nothing) when none are held.
    pub fn consume_one(&mut self) -> bool {
        if self.brewed == 0 {
            return false;
        }
        self.brewed -= 1;
        true
    }

    /// Requirements sorted by [`formula_order`].
    pub fn formula(&self) -> Vec<&Requirement> {
        let mut sorted: Vec<&Requirement> = self.requirements.iter().collect();
        sorted.sort_by(|a, b| formula_order(a, b));
        sorted
    }
}

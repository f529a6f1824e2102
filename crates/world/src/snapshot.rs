//! Canonical, comparable view of a whole [`GameState`].

use alembic_core::{Quantity, Requirement};
use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Knowledge about one monster, labels sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    /// Monster name.
    pub name: String,
    /// Effective signs.
    pub signs: Vec<String>,
    /// Effective potions.
    pub potions: Vec<String>,
}

/// A learned recipe and its brewed count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    /// Potion name.
    pub name: String,
    /// Potions brewed and not yet consumed.
    pub brewed: Quantity,
    /// Formula in the order it was learned.
    pub requirements: Vec<Requirement>,
}

/// Every entry of every collection, zero amounts included, sorted by name.
///
/// Two states with equal snapshots answer every query identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Ingredient stock.
    pub ingredients: Vec<Requirement>,
    /// Trophy stock.
    pub trophies: Vec<Requirement>,
    /// Known recipes with brewed counts.
    pub potions: Vec<RecipeSnapshot>,
    /// Bestiary.
    pub monsters: Vec<MonsterSnapshot>,
}

fn sorted_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = labels.map(str::to_string).collect();
    out.sort();
    out
}

impl StateSnapshot {
    /// Copy every collection of `state` into sorted vectors.
    pub fn capture(state: &GameState) -> Self {
        let mut ingredients: Vec<Requirement> = state
            .ingredients
            .iter()
            .map(|(name, count)| Requirement::new(name, *count))
            .collect();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));

        let mut trophies: Vec<Requirement> = state
            .trophies
            .iter()
            .map(|(name, count)| Requirement::new(name, *count))
            .collect();
        trophies.sort_by(|a, b| a.name.cmp(&b.name));

        let mut potions: Vec<RecipeSnapshot> = state
            .potions
            .iter()
            .map(|(name, recipe)| RecipeSnapshot {
                name: name.to_string(),
                brewed: recipe.brewed(),
                requirements: recipe.requirements().to_vec(),
            })
            .collect();
        potions.sort_by(|a, b| a.name.cmp(&b.name));

        let mut monsters: Vec<MonsterSnapshot> = state
            .monsters
            .iter()
            .map(|(name, entry)| MonsterSnapshot {
                name: name.to_string(),
                signs: sorted_labels(entry.signs().iter()),
                potions: sorted_labels(entry.potions().iter()),
            })
            .collect();
        monsters.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            ingredients,
            trophies,
            potions,
            monsters,
        }
    }
}

impl GameState {
    /// Capture a [`StateSnapshot`] of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(self)
    }
}

//! The mutable world: four independent name-keyed collections.

use alembic_core::{BestiaryEntry, HashStore, Quantity, Recipe, INITIAL_CAPACITY};
use serde::Serialize;
use tracing::info;

/// Ingredients, trophies, known recipes and monster knowledge.
///
/// The collections never reference each other except by name: a potion named
/// in a [`BestiaryEntry`] may or may not have a recipe in `potions`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Ingredient amounts.
    pub ingredients: HashStore<Quantity>,
    /// Trophy amounts, keyed by monster name.
    pub trophies: HashStore<Quantity>,
    /// Learned recipes together with the number of potions held.
    pub potions: HashStore<Recipe>,
    /// Known countermeasures per monster.
    pub monsters: HashStore<BestiaryEntry>,
}

/// Entry counts released when a [`GameState`] is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Teardown {
    /// Ingredient entries released.
    pub ingredients: usize,
    /// Trophy entries released.
    pub trophies: usize,
    /// Recipes released, with their requirement lists.
    pub potions: usize,
    /// Bestiary entries released, with their label sets.
    pub monsters: usize,
}

impl Teardown {
    /// Total entries released across all collections.
    pub fn total(&self) -> usize {
        self.ingredients + self.trophies + self.potions + self.monsters
    }
}

impl GameState {
    /// Empty world using the default bucket count for every collection.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Empty world whose four collections start with `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ingredients: HashStore::with_capacity(capacity),
            trophies: HashStore::with_capacity(capacity),
            potions: HashStore::with_capacity(capacity),
            monsters: HashStore::with_capacity(capacity),
        }
    }

    /// Tear the world down, releasing every entry and everything it owns.
    pub fn teardown(self) -> Teardown {
        let released = Teardown {
            ingredients: self.ingredients.len(),
            trophies: self.trophies.len(),
            potions: self.potions.len(),
            monsters: self.monsters.len(),
        };
        drop(self);
        info!(
            ingredients = released.ingredients,
            trophies = released.trophies,
            potions = released.potions,
            monsters = released.monsters,
            "game state torn down"
        );
        released
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alembic_core::{Countermeasure, Requirement};

    #[test]
    fn collections_start_empty_with_requested_capacity() {
        let state = GameState::with_capacity(5);
        assert!(state.ingredients.is_empty());
        assert_eq!(state.potions.capacity(), 5);
        assert_eq!(state.monsters.capacity(), 5);
    }

    #[test]
    fn teardown_reports_released_entries() {
        let mut state = GameState::new();
        state.ingredients.insert("Vermilion", 3);
        state.trophies.insert("Drowner", 1);
        state
            .potions
            .insert("Swallow", Recipe::new(vec![Requirement::new("Celandine", 2)]));
        state
            .monsters
            .insert("Ghoul", BestiaryEntry::with(Countermeasure::Sign, "Igni"));

        let released = state.teardown();
        assert_eq!(released.total(), 4);
        assert_eq!(released.potions, 1);
    }
}

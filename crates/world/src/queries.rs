//! Read-only questions about the game state.

use alembic_core::{BestiaryEntry, HashStore, Quantity, Recipe, Requirement};
use serde::{Deserialize, Serialize};

/// Amount held under `name`, zero when the name was never recorded.
pub fn quantity_of(store: &HashStore<Quantity>, name: &str) -> Quantity {
    store.get(name).copied().unwrap_or(0)
}

/// Number of brewed units of `potion` currently held.
pub fn potion_count(potions: &HashStore<Recipe>, potion: &str) -> Quantity {
    potions.get(potion).map_or(0, Recipe::brewed)
}

/// Nonzero entries of a collection in ascending byte-wise name order.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    entries: std::vec::IntoIter<(&'a str, Quantity)>,
}

impl<'a> Listing<'a> {
    fn collect_from(pairs: impl Iterator<Item = (&'a str, Quantity)>) -> Self {
        let mut entries: Vec<_> = pairs.filter(|(_, count)| *count > 0).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        Self {
            entries: entries.into_iter(),
        }
    }

    /// True when nothing is held at all.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Collect the remaining entries as owned name/amount pairs.
    pub fn into_requirements(self) -> Vec<Requirement> {
        self.map(|(name, count)| Requirement::new(name, count))
            .collect()
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = (&'a str, Quantity);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Listing<'_> {}

/// Every held ingredient or trophy, sorted by name.
pub fn list_quantities(store: &HashStore<Quantity>) -> Listing<'_> {
    Listing::collect_from(store.iter().map(|(name, count)| (name, *count)))
}

/// Every potion with at least one brewed unit, sorted by name.
pub fn list_potions(potions: &HashStore<Recipe>) -> Listing<'_> {
    Listing::collect_from(potions.iter().map(|(name, recipe)| (name, recipe.brewed())))
}

/// Signs and potions known to work against `monster`, sorted by name.
///
/// `None` when the monster has no bestiary entry.
pub fn effectiveness<'a>(
    monsters: &'a HashStore<BestiaryEntry>,
    monster: &str,
) -> Option<Vec<&'a str>> {
    monsters.get(monster).map(BestiaryEntry::countermeasures)
}

/// The recipe for `potion` ordered by descending amount, then by name.
///
/// `None` when the recipe was never learned.
pub fn formula<'a>(potions: &'a HashStore<Recipe>, potion: &str) -> Option<Vec<&'a Requirement>> {
    potions.get(potion).map(Recipe::formula)
}

/// Owned answer to a [`crate::Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryAnswer {
    /// Amount of one named item.
    Quantity(Quantity),
    /// Nonzero amounts sorted by name; never empty.
    Listing(Vec<Requirement>),
    /// A listing with nothing in it.
    Empty,
    /// Countermeasures against a monster, sorted by name.
    Countermeasures(Vec<String>),
    /// The monster has no bestiary entry.
    NoKnowledge {
        /// Monster asked about.
        monster: String,
    },
    /// Recipe requirements in formula order.
    Formula(Vec<Requirement>),
    /// The recipe was never learned.
    NoFormula {
        /// Potion asked about.
        potion: String,
    },
}

impl From<Listing<'_>> for QueryAnswer {
    fn from(listing: Listing<'_>) -> Self {
        if listing.is_empty() {
            QueryAnswer::Empty
        } else {
            QueryAnswer::Listing(listing.into_requirements())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alembic_core::Countermeasure;

    #[test]
    fn missing_names_read_as_zero() {
        let mut store = HashStore::new();
        store.insert("Vermilion", 4);
        assert_eq!(quantity_of(&store, "Vermilion"), 4);
        assert_eq!(quantity_of(&store, "Arenaria"), 0);
        assert_eq!(potion_count(&HashStore::new(), "Swallow"), 0);
    }

    #[test]
    fn listing_skips_zeros_and_sorts_bytewise() {
        let mut store = HashStore::new();
        store.insert("vitriol", 1);
        store.insert("Rebis", 0);
        store.insert("Aether", 2);
        store.insert("Quebrith", 5);

        let listing = list_quantities(&store);
        assert_eq!(listing.len(), 3);
        let names: Vec<_> = listing.map(|(name, _)| name).collect();
        assert_eq!(names, ["Aether", "Quebrith", "vitriol"]);
    }

    #[test]
    fn listing_of_only_zeros_is_empty() {
        let mut store = HashStore::new();
        store.insert("Rebis", 0);
        assert!(list_quantities(&store).is_empty());
        assert_eq!(QueryAnswer::from(list_quantities(&store)), QueryAnswer::Empty);
    }

    #[test]
    fn potion_listing_uses_brewed_counts() {
        let mut potions = HashStore::new();
        let mut swallow = Recipe::new(vec![Requirement::new("Celandine", 1)]);
        swallow.record_brew();
        potions.insert("Swallow", swallow);
        potions.insert("Cat", Recipe::new(vec![Requirement::new("Arenaria", 1)]));

        let answer = QueryAnswer::from(list_potions(&potions));
        assert_eq!(
            answer,
            QueryAnswer::Listing(vec![Requirement::new("Swallow", 1)])
        );
    }

    #[test]
    fn effectiveness_merges_signs_and_potions() {
        let mut monsters = HashStore::new();
        let mut entry = BestiaryEntry::with(Countermeasure::Sign, "Igni");
        entry.learn(Countermeasure::Potion, "Black Blood");
        entry.learn(Countermeasure::Sign, "Aard");
        monsters.insert("Katakan", entry);

        assert_eq!(
            effectiveness(&monsters, "Katakan"),
            Some(vec!["Aard", "Black Blood", "Igni"])
        );
        assert_eq!(effectiveness(&monsters, "Bruxa"), None);
    }

    #[test]
    fn formula_orders_by_amount_then_name() {
        let mut potions = HashStore::new();
        potions.insert(
            "Swallow",
            Recipe::new(vec![
                Requirement::new("Vitriol", 1),
                Requirement::new("Rebis", 3),
                Requirement::new("Aether", 1),
            ]),
        );
        let order: Vec<_> = formula(&potions, "Swallow")
            .expect("known")
            .into_iter()
            .map(|req| (req.name.as_str(), req.count))
            .collect();
        assert_eq!(order, [("Rebis", 3), ("Aether", 1), ("Vitriol", 1)]);
        assert!(formula(&potions, "Cat").is_none());
    }
}

//! Transactional actions over the game collections.
//!
//! Every action validates all of its preconditions before touching any
//! collection, so a refused action leaves the state untouched.

use alembic_core::{
    tally, BestiaryEntry, Countermeasure, HashStore, Quantity, Recipe, Requirement,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ActionError, Knowledge, Resource};

/// What a successful action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionReport {
    /// Loot was added to the ingredients.
    IngredientsLooted,
    /// Trophies were exchanged for ingredients.
    TradeCompleted,
    /// One potion was brewed.
    PotionBrewed {
        /// Potion brewed.
        potion: String,
    },
    /// A new recipe was learned.
    FormulaLearned {
        /// Potion the recipe brews.
        potion: String,
    },
    /// First knowledge about a monster.
    BestiaryEntryAdded {
        /// Monster recorded.
        monster: String,
    },
    /// A new countermeasure for an already known monster.
    BestiaryEntryUpdated {
        /// Monster updated.
        monster: String,
    },
    /// The monster was beaten and left a trophy.
    MonsterDefeated {
        /// Monster defeated.
        monster: String,
        /// Potions that were drunk, one unit each.
        potions_used: Vec<String>,
    },
}

/// Add `amount` to the quantity under `name`, creating the entry if needed.
fn deposit(store: &mut HashStore<Quantity>, name: &str, amount: Quantity) {
    match store.get(name).copied() {
        Some(held) => {
            store.update(name, held.saturating_add(amount));
        }
        None => {
            store.insert(name, amount);
        }
    }
}

/// Check that every (already tallied) requirement is covered by `store`.
fn ensure_stock(
    store: &HashStore<Quantity>,
    needed: &[Requirement],
    resource: Resource,
) -> Result<(), ActionError> {
    let covered = needed
        .iter()
        .all(|req| store.get(&req.name).is_some_and(|held| *held >= req.count));
    if covered {
        Ok(())
    } else {
        Err(ActionError::InsufficientResource { resource })
    }
}

/// Remove requirements previously checked by [`ensure_stock`].
fn withdraw(store: &mut HashStore<Quantity>, needed: &[Requirement]) {
    for req in needed {
        if let Some(held) = store.get_mut(&req.name) {
            *held -= req.count;
        }
    }
}

/// Add every looted amount to the ingredients. Always succeeds.
pub fn loot(ingredients: &mut HashStore<Quantity>, deltas: &[Requirement]) -> ActionReport {
    for delta in deltas {
        deposit(ingredients, &delta.name, delta.count);
    }
    debug!(kinds = deltas.len(), "looted ingredients");
    ActionReport::IngredientsLooted
}

/// Pay `paid` trophies and receive `received` ingredients.
///
/// Refused with [`Resource::Trophies`] unless every trophy is held in the
/// required amount; nothing changes in that case.
pub fn trade(
    ingredients: &mut HashStore<Quantity>,
    trophies: &mut HashStore<Quantity>,
    received: &[Requirement],
    paid: &[Requirement],
) -> Result<ActionReport, ActionError> {
    let paid = tally(paid);
    ensure_stock(trophies, &paid, Resource::Trophies)?;

    withdraw(trophies, &paid);
    for req in received {
        deposit(ingredients, &req.name, req.count);
    }
    debug!(paid = paid.len(), received = received.len(), "trade committed");
    Ok(ActionReport::TradeCompleted)
}

/// Brew one unit of `potion` from its learned recipe.
pub fn brew(
    potions: &mut HashStore<Recipe>,
    ingredients: &mut HashStore<Quantity>,
    potion: &str,
) -> Result<ActionReport, ActionError> {
    let needed = match potions.get(potion) {
        Some(recipe) => tally(recipe.requirements()),
        None => {
            return Err(ActionError::UnknownFormula {
                potion: potion.to_string(),
            })
        }
    };
    ensure_stock(ingredients, &needed, Resource::Ingredients)?;

    withdraw(ingredients, &needed);
    if let Some(recipe) = potions.get_mut(potion) {
        recipe.record_brew();
    }
    debug!(potion, "brewed potion");
    Ok(ActionReport::PotionBrewed {
        potion: potion.to_string(),
    })
}

/// Learn the recipe for `potion`.
///
/// A recipe that is already known is kept as is and `requirements` is dropped.
pub fn learn_recipe(
    potions: &mut HashStore<Recipe>,
    potion: &str,
    requirements: Vec<Requirement>,
) -> Result<ActionReport, ActionError> {
    if potions.contains(potion) {
        return Err(ActionError::DuplicateKnowledge {
            knowledge: Knowledge::Formula,
        });
    }
    potions.insert(potion, Recipe::new(requirements));
    debug!(potion, "learned formula");
    Ok(ActionReport::FormulaLearned {
        potion: potion.to_string(),
    })
}

/// Record that `label` works against `monster`.
pub fn learn_countermeasure(
    monsters: &mut HashStore<BestiaryEntry>,
    monster: &str,
    kind: Countermeasure,
    label: &str,
) -> Result<ActionReport, ActionError> {
    let Some(entry) = monsters.get_mut(monster) else {
        monsters.insert(monster, BestiaryEntry::with(kind, label));
        debug!(monster, ?kind, label, "new bestiary entry");
        return Ok(ActionReport::BestiaryEntryAdded {
            monster: monster.to_string(),
        });
    };
    if !entry.learn(kind, label) {
        return Err(ActionError::DuplicateKnowledge {
            knowledge: Knowledge::Effectiveness,
        });
    }
    debug!(monster, ?kind, label, "bestiary entry updated");
    Ok(ActionReport::BestiaryEntryUpdated {
        monster: monster.to_string(),
    })
}

/// Record that `sign` works against `monster`.
pub fn learn_sign(
    monsters: &mut HashStore<BestiaryEntry>,
    monster: &str,
    sign: &str,
) -> Result<ActionReport, ActionError> {
    learn_countermeasure(monsters, monster, Countermeasure::Sign, sign)
}

/// Record that `potion` works against `monster`.
pub fn learn_potion(
    monsters: &mut HashStore<BestiaryEntry>,
    monster: &str,
    potion: &str,
) -> Result<ActionReport, ActionError> {
    learn_countermeasure(monsters, monster, Countermeasure::Potion, potion)
}

/// Fight `monster`.
///
/// Every effective potion that is held is drunk once. The fight is won if at
/// least one potion was drunk or any sign is known; a win adds one trophy.
pub fn encounter(
    monsters: &HashStore<BestiaryEntry>,
    potions: &mut HashStore<Recipe>,
    trophies: &mut HashStore<Quantity>,
    monster: &str,
) -> Result<ActionReport, ActionError> {
    let Some(entry) = monsters.get(monster) else {
        return Err(ActionError::Unprepared {
            monster: monster.to_string(),
            known: false,
        });
    };

    let mut potions_used = Vec::new();
    for potion in entry.potions().iter() {
        if potions.get_mut(potion).is_some_and(Recipe::consume_one) {
            potions_used.push(potion.to_string());
        }
    }

    if potions_used.is_empty() && entry.signs().is_empty() {
        return Err(ActionError::Unprepared {
            monster: monster.to_string(),
            known: true,
        });
    }

    deposit(trophies, monster, 1);
    debug!(monster, potions = potions_used.len(), "monster defeated");
    Ok(ActionReport::MonsterDefeated {
        monster: monster.to_string(),
        potions_used,
    })
}

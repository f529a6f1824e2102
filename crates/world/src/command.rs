//! Typed actions and queries, dispatched against a [`GameState`].

use alembic_core::{Countermeasure, Requirement};
use serde::{Deserialize, Serialize};

use crate::actions::{self, ActionReport};
use crate::error::ActionError;
use crate::queries::{self, QueryAnswer};
use crate::state::GameState;

/// Which stock a quantity query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stock {
    /// Ingredients.
    Ingredient,
    /// Brewed potions.
    Potion,
    /// Trophies.
    Trophy,
}

/// A state-changing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Add looted ingredients.
    Loot {
        /// Amounts looted.
        ingredients: Vec<Requirement>,
    },
    /// Exchange trophies for ingredients.
    Trade {
        /// Ingredients received.
        ingredients: Vec<Requirement>,
        /// Trophies paid.
        trophies: Vec<Requirement>,
    },
    /// Brew one potion.
    Brew {
        /// Potion to brew.
        potion: String,
    },
    /// Learn a recipe.
    LearnRecipe {
        /// Potion the recipe brews.
        potion: String,
        /// Ingredients consumed per brew.
        requirements: Vec<Requirement>,
    },
    /// Learn that a sign or potion works against a monster.
    LearnCountermeasure {
        /// Monster concerned.
        monster: String,
        /// Sign or potion.
        kind: Countermeasure,
        /// Name of the sign or potion.
        label: String,
    },
    /// Fight a monster.
    Encounter {
        /// Monster fought.
        monster: String,
    },
}

/// A read-only request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Amount of one named item.
    Total {
        /// Collection to read.
        stock: Stock,
        /// Item name.
        name: String,
    },
    /// Every nonzero entry of a collection.
    TotalAll {
        /// Collection to read.
        stock: Stock,
    },
    /// Countermeasures known for a monster.
    EffectiveAgainst {
        /// Monster asked about.
        monster: String,
    },
    /// Ingredients of a potion's recipe.
    Formula {
        /// Potion asked about.
        potion: String,
    },
}

impl GameState {
    /// Perform `action`, leaving the state untouched when it is refused.
    pub fn apply(&mut self, action: Action) -> Result<ActionReport, ActionError> {
        match action {
            Action::Loot { ingredients } => Ok(actions::loot(&mut self.ingredients, &ingredients)),
            Action::Trade {
                ingredients,
                trophies,
            } => actions::trade(
                &mut self.ingredients,
                &mut self.trophies,
                &ingredients,
                &trophies,
            ),
            Action::Brew { potion } => {
                actions::brew(&mut self.potions, &mut self.ingredients, &potion)
            }
            Action::LearnRecipe {
                potion,
                requirements,
            } => actions::learn_recipe(&mut self.potions, &potion, requirements),
            Action::LearnCountermeasure {
                monster,
                kind,
                label,
            } => actions::learn_countermeasure(&mut self.monsters, &monster, kind, &label),
            Action::Encounter { monster } => actions::encounter(
                &self.monsters,
                &mut self.potions,
                &mut self.trophies,
                &monster,
            ),
        }
    }

    /// Answer `query` without changing anything.
    pub fn answer(&self, query: &Query) -> QueryAnswer {
        match query {
            Query::Total { stock, name } => QueryAnswer::Quantity(match stock {
                Stock::Ingredient => queries::quantity_of(&self.ingredients, name),
                Stock::Trophy => queries::quantity_of(&self.trophies, name),
                Stock::Potion => queries::potion_count(&self.potions, name),
            }),
            Query::TotalAll { stock } => match stock {
                Stock::Ingredient => queries::list_quantities(&self.ingredients).into(),
                Stock::Trophy => queries::list_quantities(&self.trophies).into(),
                Stock::Potion => queries::list_potions(&self.potions).into(),
            },
            Query::EffectiveAgainst { monster } => {
                match queries::effectiveness(&self.monsters, monster) {
                    Some(labels) => QueryAnswer::Countermeasures(
                        labels.into_iter().map(str::to_string).collect(),
                    ),
                    None => QueryAnswer::NoKnowledge {
                        monster: monster.clone(),
                    },
                }
            }
            Query::Formula { potion } => match queries::formula(&self.potions, potion) {
                Some(reqs) => QueryAnswer::Formula(reqs.into_iter().cloned().collect()),
                None => QueryAnswer::NoFormula {
                    potion: potion.clone(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_answer_round_through_state() {
        let mut state = GameState::new();
        state
            .apply(Action::Loot {
                ingredients: vec![Requirement::new("Rebis", 2)],
            })
            .expect("loot");
        state
            .apply(Action::LearnRecipe {
                potion: "Swallow".to_string(),
                requirements: vec![Requirement::new("Rebis", 1)],
            })
            .expect("learn");
        state
            .apply(Action::Brew {
                potion: "Swallow".to_string(),
            })
            .expect("brew");

        let total = state.answer(&Query::Total {
            stock: Stock::Ingredient,
            name: "Rebis".to_string(),
        });
        assert_eq!(total, QueryAnswer::Quantity(1));
        let potions = state.answer(&Query::TotalAll {
            stock: Stock::Potion,
        });
        assert_eq!(
            potions,
            QueryAnswer::Listing(vec![Requirement::new("Swallow", 1)])
        );
        let trophies = state.answer(&Query::TotalAll {
            stock: Stock::Trophy,
        });
        assert_eq!(trophies, QueryAnswer::Empty);
    }

    #[test]
    fn unknown_names_have_explicit_answers() {
        let state = GameState::new();
        assert_eq!(
            state.answer(&Query::EffectiveAgainst {
                monster: "Bruxa".to_string()
            }),
            QueryAnswer::NoKnowledge {
                monster: "Bruxa".to_string()
            }
        );
        assert_eq!(
            state.answer(&Query::Formula {
                potion: "Cat".to_string()
            }),
            QueryAnswer::NoFormula {
                potion: "Cat".to_string()
            }
        );
    }
}

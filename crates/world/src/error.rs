//! Recoverable action failures.
//!
//! Every failure leaves the game state exactly as it was before the action.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource an action ran short of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    /// Trophies demanded by a trade.
    Trophies,
    /// Ingredients demanded by a recipe.
    Ingredients,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Trophies => write!(f, "trophies"),
            Resource::Ingredients => write!(f, "ingredients"),
        }
    }
}

/// Kind of knowledge that was learned twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Knowledge {
    /// A potion recipe.
    Formula,
    /// A sign or potion already recorded against the monster.
    Effectiveness,
}

impl fmt::Display for Knowledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Knowledge::Formula => write!(f, "formula"),
            Knowledge::Effectiveness => write!(f, "effectiveness"),
        }
    }
}

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    /// Brewing a potion whose recipe was never learned.
    #[error("No formula for {potion}")]
    UnknownFormula {
        /// Requested potion.
        potion: String,
    },
    /// A trade or brew requirement is not covered by current stock.
    #[error("Not enough {resource}")]
    InsufficientResource {
        /// Which stock fell short.
        resource: Resource,
    },
    /// Learning something already known.
    #[error("Already known {knowledge}")]
    DuplicateKnowledge {
        /// What was already known.
        knowledge: Knowledge,
    },
    /// No usable potion and no sign against the monster.
    #[error("Geralt is unprepared and barely escapes with his life")]
    Unprepared {
        /// Monster encountered.
        monster: String,
        /// Whether the bestiary had an entry for it at all.
        known: bool,
    },
}

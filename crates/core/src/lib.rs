#![warn(missing_docs)]
//! Core primitives shared across the workspace: the name-keyed hash store and
//! the values kept in it.

pub mod bestiary;
pub mod name;
pub mod recipe;
pub mod store;

pub use bestiary::{BestiaryEntry, Countermeasure, LabelSet};
pub use name::{is_valid_name, validate_name, NameError};
pub use recipe::{formula_order, tally, Quantity, Recipe, Requirement};
pub use store::{polynomial_hash, HashStore, HASH_MODULUS, INITIAL_CAPACITY, LOAD_FACTOR_THRESHOLD};

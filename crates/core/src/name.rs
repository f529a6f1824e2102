//! Name grammar shared by ingredients, potions, signs and monsters.
//!
//! A valid name is non-empty, made of ASCII letters and single interior
//! spaces. This is also the input domain [`crate::polynomial_hash`] is tuned for.

use thiserror::Error;

/// Reasons a candidate name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Nothing to name.
    #[error("name is empty")]
    Empty,
    /// Digits, punctuation and non-ASCII letters are not allowed.
    #[error("name contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// Two spaces in a row.
    #[error("name contains consecutive spaces")]
    ConsecutiveSpaces,
    /// Leading or trailing space.
    #[error("name starts or ends with a space")]
    EdgeSpace,
}

/// Check `name` against the name grammar.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(ch) = name.chars().find(|c| !c.is_ascii_alphabetic() && *c != ' ') {
        return Err(NameError::InvalidCharacter(ch));
    }
    if name.contains("  ") {
        return Err(NameError::ConsecutiveSpaces);
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(NameError::EdgeSpace);
    }
    Ok(())
}

/// Convenience wrapper over [`validate_name`].
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

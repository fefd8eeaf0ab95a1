//! Identifier types for the record domain.

use super::InvalidAdrNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable number of an Architecture Decision Record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdrNumber(u32);

impl AdrNumber {
    /// Creates a validated record number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAdrNumber`] when the value is zero; record numbering
    /// starts at one.
    pub const fn new(value: u32) -> Result<Self, InvalidAdrNumber> {
        if value == 0 {
            return Err(InvalidAdrNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the wrapped number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AdrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for AdrNumber {
    type Error = InvalidAdrNumber;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

//! Error types for record domain validation.

use thiserror::Error;

/// Error returned while constructing a record number.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid ADR number {0}, expected a positive integer")]
pub struct InvalidAdrNumber(pub u32);

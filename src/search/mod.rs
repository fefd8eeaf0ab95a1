//! Debounced, cancellable search over the record listing.
//!
//! The user types, the controller debounces, and at most one fetch is in
//! flight per controller; superseded requests are cancelled and their
//! settlements discarded. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

pub use domain::{ListSnapshot, QueryPhase};
pub use services::DebouncedQueryController;

#[cfg(test)]
mod tests;

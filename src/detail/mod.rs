//! Record detail loading with cancellation on teardown.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

pub use domain::DetailPhase;
pub use services::DetailController;

#[cfg(test)]
mod tests;

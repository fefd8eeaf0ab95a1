//! Status transitions with a guarded supersede sub-flow.
//!
//! Direct transitions submit immediately with optimistic apply and rollback
//! on failure; the reserved superseded label detours through a confirmation
//! panel backed by its own cancellable candidate fetch. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

pub use domain::{CandidatePhase, Feedback, TransitionFlow, TransitionSnapshot};
pub use services::{StatusTransitionMachine, SupersedeCandidateController};

#[cfg(test)]
mod tests;

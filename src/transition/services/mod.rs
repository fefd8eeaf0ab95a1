//! Application services for the status-transition workflow.

mod candidates;
mod machine;

pub use candidates::SupersedeCandidateController;
pub use machine::StatusTransitionMachine;

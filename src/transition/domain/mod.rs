//! Domain model for the status-transition workflow.

mod candidate;
mod flow;

pub use candidate::CandidatePhase;
pub use flow::{Feedback, TransitionFlow, TransitionSnapshot};

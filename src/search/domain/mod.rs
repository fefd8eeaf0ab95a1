//! Domain model for the debounced list query.

mod phase;

pub use phase::{ListSnapshot, MIN_QUERY_CHARS, QueryPhase, effective_query};

//! Request lifecycle primitive shared by all interaction controllers.
//!
//! This module owns no long-lived state; it provides the single settlement
//! guarantee the controllers build their stale-result suppression on.

pub mod lifecycle;

pub use lifecycle::{CancelAware, Outcome, execute};

#[cfg(test)]
mod tests;

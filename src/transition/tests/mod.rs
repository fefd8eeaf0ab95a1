//! Unit tests for the status-transition workflow.

//! Unit tests for the record context.
//!
//! Tests are organised by concern: domain values and error taxonomy, wire
//! shapes, and the in-memory adapter's listing semantics.

mod wire_tests;

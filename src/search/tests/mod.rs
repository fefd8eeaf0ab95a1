//! Unit tests for the debounced list-query controller.

//! Unit tests for the detail-view load controller.

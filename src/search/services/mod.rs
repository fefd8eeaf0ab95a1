//! Application services for the debounced list query.

mod controller;

pub use controller::DebouncedQueryController;

//! Application services for the record detail view.

mod controller;

pub use controller::DetailController;

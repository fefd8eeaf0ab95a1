//! Adapter implementations of the record API port.

pub mod http;
pub mod memory;

pub use http::HttpRecordApi;
pub use memory::InMemoryRecordApi;

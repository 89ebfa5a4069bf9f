//! Storage adapters

mod http;

pub use http::HttpStorageTransport;

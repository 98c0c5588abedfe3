//! Utility modules supporting the fetch pipeline.
//!
//! - [`HttpClient`]: shared HTTP client wrapper with browser identification

mod http;

pub use http::HttpClient;

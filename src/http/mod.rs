//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the asset handler and the API
//! dispatcher: content types, caching, range requests, response builders.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::{parse_range_header, ByteRange};
pub use response::{
    build_404_response, build_405_response, build_413_response, build_416_response,
    build_json_response, build_options_response,
};

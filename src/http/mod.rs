//! HTTP protocol layer module
//!
//! Query decoding and response builders, decoupled from the listing logic.

pub mod query;
pub mod response;

// Re-export commonly used functions
pub use query::parse_query;
pub use response::{
    build_404_response, build_405_response, build_500_response, build_health_response,
    build_json_response, build_options_response,
};

//! HTTP protocol layer module
//!
//! Query parsing and response building, decoupled from the handlers.

pub mod query;
pub mod response;

// Re-export commonly used items
pub use query::query_param;
pub use response::{build_404_response, build_text_response};

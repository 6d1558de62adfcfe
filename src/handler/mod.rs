//! Request handler module
//!
//! Routes requests to the health and greeting handlers.

pub mod greeting;
pub mod router;

// Re-export main entry point
pub use router::handle_request;

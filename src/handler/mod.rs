//! Request handler module
//!
//! Responsible for request routing and the arithmetic route itself.

pub mod calculate;
mod error;
pub mod router;
mod types;

pub use error::ServiceError;
// Re-export main entry point
pub use router::handle_request;

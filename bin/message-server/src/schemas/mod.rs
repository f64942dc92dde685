//! Wire types for the HTTP API.

pub mod message;

/// `status` value of every successful API response.
pub const STATUS_SUCCESS: &str = "success";
/// `status` value of every error response.
pub const STATUS_ERROR: &str = "error";

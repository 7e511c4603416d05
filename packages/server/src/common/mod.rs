// Common types and utilities shared across the application

pub mod errors;
pub mod types;

pub use errors::{ApiError, ApiResult};
pub use types::*;

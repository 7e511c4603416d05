// Harborview Bookings - API Core
//
// Backend for the Harborview resource-booking mobile app: reservation
// conflict detection plus payment reconciliation against the Mollie gateway.
// Architecture follows domain-driven design; external services sit behind
// kernel traits so domain logic stays testable.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

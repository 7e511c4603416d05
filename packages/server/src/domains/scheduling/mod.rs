//! Scheduling domain - time windows and availability rules
//!
//! Pure calendar math with no I/O. The bookings domain feeds stored windows
//! through these functions; route handlers use them for advisory checks.

pub mod availability;
pub mod window;

pub use availability::{is_available, AvailabilityPolicy};
pub use window::{TimeWindow, WindowError};

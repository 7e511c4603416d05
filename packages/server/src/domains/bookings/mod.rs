//! Bookings domain - resources and the reservations held on them
//!
//! The bookings table is the system of record for reservations. All conflict
//! decisions that matter happen here, inside transactions, not in the
//! advisory checks the API layer runs first.

pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{BookingData, ResourceData};
pub use models::booking::{Booking, CancelOutcome, CreateOutcome, NewBooking};
pub use models::resource::Resource;

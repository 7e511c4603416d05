// Business domains
pub mod bookings;
pub mod payments;
pub mod scheduling;

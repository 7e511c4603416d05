// HTTP routes
pub mod bookings;
pub mod health;
pub mod payments;
pub mod resources;
pub mod webhooks;

pub use bookings::*;
pub use health::*;
pub use payments::*;
pub use resources::*;
pub use webhooks::*;

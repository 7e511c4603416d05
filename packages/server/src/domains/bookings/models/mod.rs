pub mod booking;
pub mod resource;

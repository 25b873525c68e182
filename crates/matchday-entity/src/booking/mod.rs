//! Booking entities and code generation.

pub mod code;
pub mod model;
pub mod status;

pub use model::{Booking, CreateBooking};
pub use status::BookingStatus;

//! Branch, seating section, and seat entities.

pub mod model;
pub mod seat;
pub mod section;

pub use model::Branch;
pub use seat::{Seat, SeatWithSurcharge};
pub use section::SeatingSection;

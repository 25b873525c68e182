//! Core traits defined in `matchday-core` and implemented by other crates.

pub mod event_publisher;
pub mod seat_inventory;

pub use event_publisher::EventPublisher;
pub use seat_inventory::SeatInventory;

//! Booking lifecycle: create, confirm, check in, cancel.

pub mod pricing;
pub mod service;

pub use pricing::{BookingPrice, price_booking};
pub use service::{BookingService, CheckIn, CreateBookingRequest};

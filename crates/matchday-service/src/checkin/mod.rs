//! QR check-in at the door.

pub mod service;

pub use service::{BookingView, CheckInService, ScanResult};

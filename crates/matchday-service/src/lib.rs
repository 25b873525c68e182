//! # matchday-service
//!
//! Business logic service layer for MatchDay. Each service orchestrates
//! the seat inventory, stores, subscription enforcement, and event
//! publishing to implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod booking;
pub mod checkin;
pub mod context;
pub mod error;
pub mod inventory;
pub mod loyalty;
pub mod notification;
pub mod subscription;

pub use access::CapabilityEnforcer;
pub use booking::{BookingService, CheckIn, CreateBookingRequest};
pub use checkin::{CheckInService, ScanResult};
pub use context::RequestContext;
pub use error::{BookingError, BookingResult};
pub use inventory::MemorySeatInventory;
pub use loyalty::LoyaltyService;
pub use notification::TracingPublisher;
pub use subscription::EnforcementService;

//! Loyalty ledger service.

pub mod service;

pub use service::LoyaltyService;

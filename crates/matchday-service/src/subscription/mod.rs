//! Subscription plan enforcement.

pub mod enforcement;

pub use enforcement::{EnforcementService, billing_period_start};

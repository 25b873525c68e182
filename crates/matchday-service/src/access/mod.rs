//! Capability-based access control for staff operations.

pub mod enforcer;

pub use enforcer::CapabilityEnforcer;

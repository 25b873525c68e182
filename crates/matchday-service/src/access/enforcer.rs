//! Capability enforcement — checks whether a staff role holds a capability.

use matchday_core::error::AppError;
use matchday_entity::staff::{Capability, StaffRole};

use crate::context::RequestContext;

/// Enforces capability checks for staff-facing operations.
///
/// The grant table itself lives on [`Capability`]; the enforcer turns a
/// missing grant into an authorization error at the service boundary.
#[derive(Debug, Clone, Default)]
pub struct CapabilityEnforcer;

impl CapabilityEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the acting staff member holds the capability.
    ///
    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require(&self, ctx: &RequestContext, capability: Capability) -> Result<(), AppError> {
        if capability.granted_to(ctx.role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{}' does not have capability '{capability:?}'",
                ctx.role
            )))
        }
    }

    /// Checks whether the role holds the capability (returns bool).
    pub fn has(&self, role: StaffRole, capability: Capability) -> bool {
        capability.granted_to(role)
    }
}

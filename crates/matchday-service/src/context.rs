//! Request context carrying the acting staff member and their tenant scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matchday_entity::staff::StaffRole;

/// Context for the current staff request.
///
/// Built by the calling surface and passed into service methods so that
/// every operation knows *who* is acting and for *which* cafe. The
/// branch is carried explicitly rather than read from mutable session
/// state, so concurrent requests from the same staff member cannot
/// observe each other's branch selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting staff member's ID.
    pub staff_id: Uuid,
    /// The cafe the staff member belongs to.
    pub cafe_id: Uuid,
    /// The branch the request targets, when branch-scoped.
    pub branch_id: Option<Uuid>,
    /// The staff member's role.
    pub role: StaffRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(staff_id: Uuid, cafe_id: Uuid, branch_id: Option<Uuid>, role: StaffRole) -> Self {
        Self {
            staff_id,
            cafe_id,
            branch_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the acting staff member is the cafe owner.
    pub fn is_owner(&self) -> bool {
        matches!(self.role, StaffRole::Owner)
    }
}

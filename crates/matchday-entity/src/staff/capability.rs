//! Capabilities granted to staff roles.

use serde::{Deserialize, Serialize};

use super::role::StaffRole;

/// A discrete action a staff member may be allowed to perform.
///
/// The set is closed: capabilities are matched exhaustively, so adding
/// one forces every grant table to take a position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// List and inspect bookings.
    ViewBookings,
    /// Confirm and cancel bookings.
    ManageBookings,
    /// Check bookings in at the door.
    CheckInBookings,
    /// Create, publish, and close matches.
    ManageMatches,
    /// Administer branches, sections, and seats.
    ManageBranches,
    /// Administer promotional offers.
    ManageOffers,
    /// Invite and remove staff members.
    ManageStaff,
    /// Read revenue and attendance reports.
    ViewReports,
}

impl Capability {
    /// Whether the given role holds this capability.
    pub fn granted_to(&self, role: StaffRole) -> bool {
        match role {
            StaffRole::Owner => true,
            StaffRole::Manager => !matches!(self, Self::ManageStaff),
            StaffRole::Cashier => matches!(
                self,
                Self::ViewBookings | Self::CheckInBookings
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_holds_everything() {
        assert!(Capability::ManageStaff.granted_to(StaffRole::Owner));
        assert!(Capability::ViewReports.granted_to(StaffRole::Owner));
    }

    #[test]
    fn test_manager_cannot_administer_staff() {
        assert!(Capability::ManageMatches.granted_to(StaffRole::Manager));
        assert!(!Capability::ManageStaff.granted_to(StaffRole::Manager));
    }

    #[test]
    fn test_cashier_is_front_of_house_only() {
        assert!(Capability::CheckInBookings.granted_to(StaffRole::Cashier));
        assert!(Capability::ViewBookings.granted_to(StaffRole::Cashier));
        assert!(!Capability::ManageBookings.granted_to(StaffRole::Cashier));
        assert!(!Capability::ViewReports.granted_to(StaffRole::Cashier));
    }
}

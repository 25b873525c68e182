//! Staff member, role, and capability entities.

pub mod capability;
pub mod model;
pub mod role;

pub use capability::Capability;
pub use model::StaffMember;
pub use role::StaffRole;

//! Cafe status enumeration.
//!
//! An explicit status column replaces the soft-delete flag the platform
//! previously used: a suspended cafe keeps its data but accepts no new
//! bookings or admin mutations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use matchday_core::AppError;

/// Operational status of a cafe tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cafe_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CafeStatus {
    /// The cafe is live and can receive bookings.
    Active,
    /// The cafe is suspended by the platform; no new activity allowed.
    Suspended,
}

impl CafeStatus {
    /// Whether the cafe may receive bookings and admin mutations.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for CafeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CafeStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            _ => Err(AppError::validation(format!(
                "Invalid cafe status: '{s}'. Expected one of: active, suspended"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(CafeStatus::Active.is_active());
        assert!(!CafeStatus::Suspended.is_active());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("active".parse::<CafeStatus>().unwrap(), CafeStatus::Active);
        assert!("deleted".parse::<CafeStatus>().is_err());
    }
}

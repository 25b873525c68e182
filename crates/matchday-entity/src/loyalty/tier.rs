//! Loyalty tier enumeration and progression.

use serde::{Deserialize, Serialize};
use std::fmt;

use matchday_core::config::loyalty::TierThresholds;

/// Loyalty membership level, ordered by lifetime earned points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "loyalty_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    /// Starting tier.
    Bronze,
    /// Reached at the configured silver threshold.
    Silver,
    /// Reached at the configured gold threshold.
    Gold,
    /// Top tier.
    Platinum,
}

impl LoyaltyTier {
    /// Resolve the tier for a lifetime earned-points total.
    ///
    /// Tiers never regress: progression is computed from lifetime earned
    /// points, which clawbacks and redemptions do not reduce.
    pub fn for_lifetime_points(points: u32, thresholds: &TierThresholds) -> Self {
        if points >= thresholds.platinum {
            Self::Platinum
        } else if points >= thresholds.gold {
            Self::Gold
        } else if points >= thresholds.silver {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

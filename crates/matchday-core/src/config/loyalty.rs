//! Loyalty ledger configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loyalty ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyConfig {
    /// Points earned per unit of currency spent on a confirmed booking.
    #[serde(default = "default_earn_rate")]
    pub earn_rate: Decimal,
    /// Whether cancelling a confirmed booking reverses the points that
    /// were awarded for it. The card balance saturates at zero.
    #[serde(default = "default_true")]
    pub clawback_on_cancel: bool,
    /// Lifetime-points thresholds for tier progression.
    #[serde(default)]
    pub tiers: TierThresholds,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            earn_rate: default_earn_rate(),
            clawback_on_cancel: true,
            tiers: TierThresholds::default(),
        }
    }
}

/// Lifetime earned-points thresholds at which each tier is reached.
///
/// Bronze is the implicit starting tier and has no threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Lifetime points required for silver.
    #[serde(default = "default_silver")]
    pub silver: u32,
    /// Lifetime points required for gold.
    #[serde(default = "default_gold")]
    pub gold: u32,
    /// Lifetime points required for platinum.
    #[serde(default = "default_platinum")]
    pub platinum: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            silver: default_silver(),
            gold: default_gold(),
            platinum: default_platinum(),
        }
    }
}

fn default_earn_rate() -> Decimal {
    Decimal::ONE
}

fn default_true() -> bool {
    true
}

fn default_silver() -> u32 {
    500
}

fn default_gold() -> u32 {
    2000
}

fn default_platinum() -> u32 {
    5000
}

//! Payment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use matchday_core::AppError;

/// Status of one attempt to collect money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting the gateway's outcome.
    Pending,
    /// Captured successfully.
    Paid,
    /// Declined or errored at the gateway.
    Failed,
    /// Captured and later returned to the fan.
    Refunded,
}

impl PaymentStatus {
    /// Whether money is currently held for this payment.
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(AppError::validation(format!(
                "Invalid payment status: '{s}'. Expected one of: pending, paid, failed, refunded"
            ))),
        }
    }
}

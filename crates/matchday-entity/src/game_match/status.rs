//! Match status enumeration and lifecycle guard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use matchday_core::AppError;

/// Lifecycle status of a scheduled match.
///
/// Forward flow is `upcoming -> live -> finished`; cancellation is
/// reachable from `upcoming` and `live`. `finished` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Scheduled but not started.
    Upcoming,
    /// Currently being played.
    Live,
    /// Played to completion.
    Finished,
    /// Called off before completion.
    Cancelled,
}

impl MatchStatus {
    /// Whether the transition to `to` is legal.
    pub fn can_transition_to(&self, to: MatchStatus) -> bool {
        matches!(
            (self, to),
            (Self::Upcoming, Self::Live)
                | (Self::Upcoming, Self::Cancelled)
                | (Self::Live, Self::Finished)
                | (Self::Live, Self::Cancelled)
        )
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "live" => Ok(Self::Live),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid match status: '{s}'. Expected one of: upcoming, live, finished, cancelled"
            ))),
        }
    }
}

//! Subscription plan limit types.

use serde::{Deserialize, Serialize};

/// A single numeric limit carried by a subscription plan.
///
/// Plans store limits as nullable integers; a missing value means the
/// plan places no cap on that resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanLimit {
    /// A fixed maximum number of resources.
    Fixed(u32),
    /// No limit for this resource.
    Unlimited,
}

impl PlanLimit {
    /// Check whether a given current count has reached this limit.
    pub fn is_reached_by(&self, current: u32) -> bool {
        match self {
            Self::Fixed(max) => current >= *max,
            Self::Unlimited => false,
        }
    }

    /// Return the numeric limit, or `None` for unlimited.
    pub fn as_max(&self) -> Option<u32> {
        match self {
            Self::Fixed(max) => Some(*max),
            Self::Unlimited => None,
        }
    }

    /// Evaluate the limit against a current usage count.
    ///
    /// Enforcement results always carry the limit and the observed count
    /// so the caller can render an upsell prompt, never a bare boolean.
    pub fn check(&self, current: u32) -> LimitCheck {
        LimitCheck {
            allowed: !self.is_reached_by(current),
            limit: self.as_max(),
            current,
        }
    }
}

impl From<Option<i32>> for PlanLimit {
    /// Convert a nullable database column into a `PlanLimit`.
    ///
    /// `NULL` and negative values mean unlimited.
    fn from(value: Option<i32>) -> Self {
        match value {
            Some(max) if max >= 0 => Self::Fixed(max as u32),
            _ => Self::Unlimited,
        }
    }
}

/// Result of evaluating a subscription limit against current usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    /// Whether the gated action may proceed.
    pub allowed: bool,
    /// The configured limit, or `None` for unlimited.
    pub limit: Option<u32>,
    /// The usage count observed at evaluation time.
    pub current: u32,
}

impl LimitCheck {
    /// A check that always allows (used when no limit applies).
    pub fn unlimited(current: u32) -> Self {
        Self {
            allowed: true,
            limit: None,
            current,
        }
    }

    /// A check that always denies (used when no active subscription exists).
    pub fn denied(current: u32) -> Self {
        Self {
            allowed: false,
            limit: Some(0),
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_limit() {
        let limit = PlanLimit::Fixed(10);
        assert!(!limit.is_reached_by(9));
        assert!(limit.is_reached_by(10));
        assert!(limit.is_reached_by(11));
    }

    #[test]
    fn test_unlimited() {
        let limit = PlanLimit::Unlimited;
        assert!(!limit.is_reached_by(0));
        assert!(!limit.is_reached_by(u32::MAX));
        assert_eq!(limit.as_max(), None);
    }

    #[test]
    fn test_check_carries_limit_and_current() {
        let check = PlanLimit::Fixed(10).check(10);
        assert!(!check.allowed);
        assert_eq!(check.limit, Some(10));
        assert_eq!(check.current, 10);

        let check = PlanLimit::Unlimited.check(250);
        assert!(check.allowed);
        assert_eq!(check.limit, None);
    }

    #[test]
    fn test_from_nullable_column() {
        assert_eq!(PlanLimit::from(None), PlanLimit::Unlimited);
        assert_eq!(PlanLimit::from(Some(-1)), PlanLimit::Unlimited);
        assert_eq!(PlanLimit::from(Some(5)), PlanLimit::Fixed(5));
    }
}

//! Subscription plan entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use matchday_core::types::PlanLimit;

/// A purchasable plan carrying the numeric usage limits for a cafe.
///
/// Limit columns are nullable; `NULL` means the plan places no cap on
/// that resource.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionPlan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// Plan name shown on the pricing page.
    pub name: String,
    /// Monthly price.
    pub price_per_month: Decimal,
    /// Maximum number of branches.
    pub max_branches: Option<i32>,
    /// Maximum matches scheduled per calendar month.
    pub max_matches_per_month: Option<i32>,
    /// Maximum staff accounts.
    pub max_staff: Option<i32>,
    /// Maximum concurrent offers.
    pub max_offers: Option<i32>,
    /// Maximum bookings accepted per calendar month.
    pub max_bookings_per_month: Option<i32>,
}

impl SubscriptionPlan {
    /// The branch-count limit.
    pub fn branch_limit(&self) -> PlanLimit {
        PlanLimit::from(self.max_branches)
    }

    /// The matches-per-month limit.
    pub fn match_limit(&self) -> PlanLimit {
        PlanLimit::from(self.max_matches_per_month)
    }

    /// The staff-count limit.
    pub fn staff_limit(&self) -> PlanLimit {
        PlanLimit::from(self.max_staff)
    }

    /// The offer-count limit.
    pub fn offer_limit(&self) -> PlanLimit {
        PlanLimit::from(self.max_offers)
    }

    /// The bookings-per-month limit.
    pub fn booking_limit(&self) -> PlanLimit {
        PlanLimit::from(self.max_bookings_per_month)
    }
}

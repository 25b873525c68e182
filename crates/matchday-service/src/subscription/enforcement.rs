//! Plan limit checks against current usage.
//!
//! Every check resolves the cafe's active subscription, counts current
//! usage, and returns a [`LimitCheck`] the caller can act on. A cafe
//! with no active subscription is denied with a limit of zero rather
//! than erroring, so callers handle both cases on one path.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::warn;
use uuid::Uuid;

use matchday_core::events::{EventPayload, PlatformEvent, SubscriptionEvent};
use matchday_core::result::AppResult;
use matchday_core::traits::event_publisher::EventPublisher;
use matchday_core::types::limit::LimitCheck;
use matchday_database::repositories::{BookingStore, SubscriptionStore, UsageStore};
use matchday_entity::subscription::ActiveSubscription;

/// The first instant of the UTC calendar month containing `now`.
///
/// Plan quotas reset on month boundaries; usage is counted from this
/// instant forward.
pub fn billing_period_start(now: DateTime<Utc>) -> DateTime<Utc> {
    // The first of a valid month at midnight always exists.
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Service that enforces subscription plan limits.
#[derive(Clone)]
pub struct EnforcementService {
    subscriptions: Arc<dyn SubscriptionStore>,
    usage: Arc<dyn UsageStore>,
    bookings: Arc<dyn BookingStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl EnforcementService {
    /// Creates a new enforcement service.
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        usage: Arc<dyn UsageStore>,
        bookings: Arc<dyn BookingStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            subscriptions,
            usage,
            bookings,
            publisher,
        }
    }

    /// Resolve the cafe's active subscription, if any.
    pub async fn active_subscription(
        &self,
        cafe_id: Uuid,
    ) -> AppResult<Option<ActiveSubscription>> {
        self.subscriptions.find_active(cafe_id, Utc::now()).await
    }

    /// May the cafe add another branch?
    pub async fn check_branch_quota(&self, cafe_id: Uuid) -> AppResult<LimitCheck> {
        let current = self.usage.count_branches(cafe_id).await?;
        self.check(cafe_id, "branches", current, |sub| {
            sub.plan.branch_limit().check(current)
        })
        .await
    }

    /// May the cafe schedule another match this month?
    pub async fn check_match_quota(&self, cafe_id: Uuid) -> AppResult<LimitCheck> {
        let period_start = billing_period_start(Utc::now());
        let current = self
            .usage
            .count_matches_in_period(cafe_id, period_start)
            .await?;
        self.check(cafe_id, "matches_per_month", current, |sub| {
            sub.plan.match_limit().check(current)
        })
        .await
    }

    /// May the cafe invite another staff member?
    pub async fn check_staff_quota(&self, cafe_id: Uuid) -> AppResult<LimitCheck> {
        let current = self.usage.count_staff(cafe_id).await?;
        self.check(cafe_id, "staff", current, |sub| {
            sub.plan.staff_limit().check(current)
        })
        .await
    }

    /// May the cafe run another live offer?
    pub async fn check_offer_quota(&self, cafe_id: Uuid) -> AppResult<LimitCheck> {
        let current = self.usage.count_offers(cafe_id).await?;
        self.check(cafe_id, "offers", current, |sub| {
            sub.plan.offer_limit().check(current)
        })
        .await
    }

    /// May the cafe accept another booking this month?
    ///
    /// This is an advisory pre-check; the authoritative count-then-act
    /// happens inside the booking store's guarded insert.
    pub async fn check_booking_quota(&self, cafe_id: Uuid) -> AppResult<LimitCheck> {
        let period_start = billing_period_start(Utc::now());
        let current = self.bookings.count_in_period(cafe_id, period_start).await?;
        self.check(cafe_id, "bookings_per_month", current, |sub| {
            sub.plan.booking_limit().check(current)
        })
        .await
    }

    async fn check(
        &self,
        cafe_id: Uuid,
        resource: &str,
        current: u32,
        evaluate: impl FnOnce(&ActiveSubscription) -> LimitCheck,
    ) -> AppResult<LimitCheck> {
        let check = match self.active_subscription(cafe_id).await? {
            Some(sub) => evaluate(&sub),
            None => LimitCheck::denied(current),
        };

        if !check.allowed {
            self.emit_limit_reached(cafe_id, resource, &check).await;
        }
        Ok(check)
    }

    /// Emit a limit-reached event. Used by collaborators that detect
    /// quota exhaustion outside the pre-checks.
    pub async fn emit_limit_reached(&self, cafe_id: Uuid, resource: &str, check: &LimitCheck) {
        let event = PlatformEvent::new(
            None,
            EventPayload::Subscription(SubscriptionEvent::LimitReached {
                cafe_id,
                resource: resource.to_string(),
                limit: check.limit,
                current: check.current,
            }),
        );
        if let Err(e) = self.publisher.publish(event).await {
            warn!(error = %e, %cafe_id, resource, "Failed to publish limit event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_period_start_truncates_to_month() {
        let now = Utc.with_ymd_and_hms(2025, 7, 19, 14, 32, 5).unwrap();
        let start = billing_period_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_billing_period_start_on_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(billing_period_start(now), now);
        assert_eq!(billing_period_start(now).month(), 12);
    }
}

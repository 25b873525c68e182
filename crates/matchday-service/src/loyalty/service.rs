//! Loyalty point awarding, clawback, and redemption.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};
use uuid::Uuid;

use matchday_core::config::loyalty::LoyaltyConfig;
use matchday_core::error::AppError;
use matchday_core::events::{EventPayload, LoyaltyEvent, PlatformEvent};
use matchday_core::result::AppResult;
use matchday_core::traits::event_publisher::EventPublisher;
use matchday_database::repositories::LoyaltyStore;
use matchday_entity::loyalty::{CreateLoyaltyTransaction, LoyaltyCard, LoyaltyTransactionKind};

/// Service for the loyalty point ledger.
#[derive(Clone)]
pub struct LoyaltyService {
    store: Arc<dyn LoyaltyStore>,
    publisher: Arc<dyn EventPublisher>,
    config: LoyaltyConfig,
}

impl LoyaltyService {
    /// Creates a new loyalty service.
    pub fn new(
        store: Arc<dyn LoyaltyStore>,
        publisher: Arc<dyn EventPublisher>,
        config: LoyaltyConfig,
    ) -> Self {
        Self {
            store,
            publisher,
            config,
        }
    }

    /// Find a fan's loyalty card.
    pub async fn card(&self, user_id: Uuid) -> AppResult<Option<LoyaltyCard>> {
        self.store.find_card(user_id).await
    }

    /// Points earned for a booking total under the configured rate,
    /// truncated to whole points.
    pub fn points_for_total(&self, total: Decimal) -> i64 {
        (total * self.config.earn_rate)
            .trunc()
            .to_i64()
            .unwrap_or(0)
            .max(0)
    }

    /// Award points for a confirmed booking. A zero-point award is
    /// skipped entirely, leaving no transaction behind.
    pub async fn award_for_booking(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
        total: Decimal,
    ) -> AppResult<Option<LoyaltyCard>> {
        let points = self.points_for_total(total);
        if points == 0 {
            return Ok(None);
        }

        let card = self
            .store
            .apply(
                &CreateLoyaltyTransaction {
                    user_id,
                    booking_id: Some(booking_id),
                    kind: LoyaltyTransactionKind::Earn,
                    points,
                },
                &self.config.tiers,
            )
            .await?;

        info!(%user_id, %booking_id, points, tier = %card.tier, "Loyalty points awarded");
        self.emit(
            user_id,
            LoyaltyEvent::PointsEarned {
                user_id,
                booking_id,
                points,
            },
        )
        .await;
        Ok(Some(card))
    }

    /// Reverse the points earned for a booking, saturating the balance
    /// at zero. A no-op when clawback is disabled or nothing was earned.
    pub async fn claw_back_for_booking(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> AppResult<Option<LoyaltyCard>> {
        if !self.config.clawback_on_cancel {
            return Ok(None);
        }

        let Some(earned) = self.store.find_earned_for_booking(booking_id).await? else {
            return Ok(None);
        };

        let card = self
            .store
            .apply(
                &CreateLoyaltyTransaction {
                    user_id,
                    booking_id: Some(booking_id),
                    kind: LoyaltyTransactionKind::Clawback,
                    points: earned.points,
                },
                &self.config.tiers,
            )
            .await?;

        info!(%user_id, %booking_id, points = earned.points, "Loyalty points clawed back");
        self.emit(
            user_id,
            LoyaltyEvent::PointsClawedBack {
                user_id,
                booking_id,
                points: earned.points,
            },
        )
        .await;
        Ok(Some(card))
    }

    /// Spend points from a fan's balance.
    pub async fn redeem(&self, user_id: Uuid, points: i64) -> AppResult<LoyaltyCard> {
        if points <= 0 {
            return Err(AppError::validation("Redeemed points must be positive"));
        }

        let card = self
            .store
            .apply(
                &CreateLoyaltyTransaction {
                    user_id,
                    booking_id: None,
                    kind: LoyaltyTransactionKind::Redeem,
                    points,
                },
                &self.config.tiers,
            )
            .await?;

        info!(%user_id, points, balance = card.points_balance, "Loyalty points redeemed");
        self.emit(user_id, LoyaltyEvent::PointsRedeemed { user_id, points })
            .await;
        Ok(card)
    }

    async fn emit(&self, actor_id: Uuid, event: LoyaltyEvent) {
        let event = PlatformEvent::new(Some(actor_id), EventPayload::Loyalty(event));
        if let Err(e) = self.publisher.publish(event).await {
            warn!(error = %e, "Failed to publish loyalty event");
        }
    }
}

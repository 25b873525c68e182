//! In-memory doubles and fixtures shared by the service tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use matchday_core::config::booking::BookingConfig;
use matchday_core::config::loyalty::{LoyaltyConfig, TierThresholds};
use matchday_core::error::AppError;
use matchday_core::events::PlatformEvent;
use matchday_core::result::AppResult;
use matchday_core::traits::event_publisher::EventPublisher;
use matchday_core::types::limit::PlanLimit;
use matchday_database::repositories::{
    BookingCreateOutcome, BookingStore, CafeStore, CreateMatch, LoyaltyStore, MatchStore,
    PaymentStore, ScanLogStore, SeatStore, SubscriptionStore, TransitionOutcome, UsageStore,
};
use matchday_entity::booking::{Booking, BookingStatus, CreateBooking};
use matchday_entity::branch::{Branch, SeatWithSurcharge, SeatingSection};
use matchday_entity::cafe::{Cafe, CafeStatus};
use matchday_entity::game_match::{GameMatch, MatchStatus};
use matchday_entity::loyalty::{
    CreateLoyaltyTransaction, LoyaltyCard, LoyaltyTier, LoyaltyTransaction,
    LoyaltyTransactionKind,
};
use matchday_entity::payment::{Payment, PaymentStatus};
use matchday_entity::scan::{CreateScanLog, ScanLog};
use matchday_entity::subscription::{ActiveSubscription, CafeSubscription, SubscriptionPlan};
use matchday_service::{BookingService, LoyaltyService, MemorySeatInventory};

// -- Publisher --

/// Publisher that records every event for assertions.
#[derive(Default)]
pub struct CapturingPublisher {
    events: Mutex<Vec<PlatformEvent>>,
}

impl CapturingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<PlatformEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for CapturingPublisher {
    async fn publish(&self, event: PlatformEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

// -- Cafe store --

#[derive(Default)]
pub struct MemoryCafeStore {
    cafes: Mutex<HashMap<Uuid, Cafe>>,
    branches: Mutex<HashMap<Uuid, Branch>>,
}

impl MemoryCafeStore {
    pub async fn insert(&self, cafe: Cafe) {
        self.cafes.lock().await.insert(cafe.id, cafe);
    }

    pub async fn insert_branch(&self, branch: Branch) {
        self.branches.lock().await.insert(branch.id, branch);
    }
}

#[async_trait]
impl CafeStore for MemoryCafeStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Cafe>> {
        Ok(self.cafes.lock().await.get(&id).cloned())
    }

    async fn find_branch(&self, id: Uuid) -> AppResult<Option<Branch>> {
        Ok(self.branches.lock().await.get(&id).cloned())
    }

    async fn set_status(&self, id: Uuid, status: CafeStatus) -> AppResult<Cafe> {
        let mut cafes = self.cafes.lock().await;
        let cafe = cafes
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Cafe {id} not found")))?;
        cafe.status = status;
        cafe.updated_at = Utc::now();
        Ok(cafe.clone())
    }
}

// -- Match store --

#[derive(Default)]
pub struct MemoryMatchStore {
    matches: Mutex<HashMap<Uuid, GameMatch>>,
}

impl MemoryMatchStore {
    pub async fn insert(&self, game_match: GameMatch) {
        self.matches.lock().await.insert(game_match.id, game_match);
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<GameMatch>> {
        Ok(self.matches.lock().await.get(&id).cloned())
    }

    async fn list_upcoming(&self, branch_id: Uuid) -> AppResult<Vec<GameMatch>> {
        let mut result: Vec<GameMatch> = self
            .matches
            .lock()
            .await
            .values()
            .filter(|m| m.branch_id == branch_id && m.published && m.status == MatchStatus::Upcoming)
            .cloned()
            .collect();
        result.sort_by_key(|m| m.kickoff_at);
        Ok(result)
    }

    async fn create(&self, data: &CreateMatch) -> AppResult<GameMatch> {
        let game_match = GameMatch {
            id: Uuid::new_v4(),
            cafe_id: data.cafe_id,
            branch_id: data.branch_id,
            title: data.title.clone(),
            kickoff_at: data.kickoff_at,
            status: MatchStatus::Upcoming,
            published: false,
            seat_price: data.seat_price,
            capacity: data.capacity,
            created_at: Utc::now(),
        };
        self.insert(game_match.clone()).await;
        Ok(game_match)
    }

    async fn publish(&self, id: Uuid) -> AppResult<GameMatch> {
        let mut matches = self.matches.lock().await;
        let game_match = matches
            .get_mut(&id)
            .filter(|m| m.status == MatchStatus::Upcoming)
            .ok_or_else(|| AppError::conflict(format!("Match {id} is not upcoming or not found")))?;
        game_match.published = true;
        Ok(game_match.clone())
    }

    async fn transition(
        &self,
        id: Uuid,
        expected: MatchStatus,
        next: MatchStatus,
    ) -> AppResult<Option<GameMatch>> {
        let mut matches = self.matches.lock().await;
        match matches.get_mut(&id) {
            Some(m) if m.status == expected => {
                m.status = next;
                Ok(Some(m.clone()))
            }
            _ => Ok(None),
        }
    }
}

// -- Seat store --

#[derive(Default)]
pub struct MemorySeatStore {
    seats: Mutex<Vec<(Uuid, SeatWithSurcharge)>>,
}

impl MemorySeatStore {
    pub async fn insert(&self, branch_id: Uuid, seat: SeatWithSurcharge) {
        self.seats.lock().await.push((branch_id, seat));
    }
}

#[async_trait]
impl SeatStore for MemorySeatStore {
    async fn find_sections(&self, _branch_id: Uuid) -> AppResult<Vec<SeatingSection>> {
        Ok(Vec::new())
    }

    async fn find_with_sections(
        &self,
        branch_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<Vec<SeatWithSurcharge>> {
        Ok(self
            .seats
            .lock()
            .await
            .iter()
            .filter(|(b, seat)| *b == branch_id && seat_ids.contains(&seat.id))
            .map(|(_, seat)| seat.clone())
            .collect())
    }
}

// -- Booking store --

#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl MemoryBookingStore {
    pub async fn insert(&self, booking: Booking) {
        self.bookings.lock().await.insert(booking.id, booking);
    }

    pub async fn get(&self, id: Uuid) -> Option<Booking> {
        self.bookings.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.bookings.lock().await.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .await
            .values()
            .find(|b| b.code == code || b.qr_token == code)
            .cloned())
    }

    async fn create_under_limit(
        &self,
        data: &CreateBooking,
        limit: PlanLimit,
        period_start: DateTime<Utc>,
    ) -> AppResult<BookingCreateOutcome> {
        let mut bookings = self.bookings.lock().await;
        let current = bookings
            .values()
            .filter(|b| {
                b.cafe_id == data.cafe_id
                    && b.status != BookingStatus::Cancelled
                    && b.created_at >= period_start
            })
            .count() as u32;

        let check = limit.check(current);
        if !check.allowed {
            return Ok(BookingCreateOutcome::LimitExceeded {
                limit: check.limit,
                current: check.current,
            });
        }

        let booking = Booking {
            id: data.id,
            code: data.code.clone(),
            qr_token: data.qr_token.clone(),
            user_id: data.user_id,
            customer_name: data.customer_name.clone(),
            cafe_id: data.cafe_id,
            branch_id: data.branch_id,
            match_id: data.match_id,
            guest_count: data.guest_count,
            status: BookingStatus::Pending,
            subtotal: data.subtotal,
            service_fee: data.service_fee,
            total: data.total,
            created_at: Utc::now(),
            confirmed_at: None,
            checked_in_at: None,
            cancelled_at: None,
        };
        bookings.insert(booking.id, booking.clone());
        Ok(BookingCreateOutcome::Created(booking))
    }

    async fn mark_confirmed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        if booking.status != BookingStatus::Pending {
            return Ok(TransitionOutcome::Rejected(booking.clone()));
        }
        booking.status = BookingStatus::Confirmed;
        booking.confirmed_at = Some(at);
        Ok(TransitionOutcome::Applied(booking.clone()))
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        if booking.status != BookingStatus::Confirmed {
            return Ok(TransitionOutcome::Rejected(booking.clone()));
        }
        booking.status = BookingStatus::CheckedIn;
        booking.checked_in_at = Some(at);
        Ok(TransitionOutcome::Applied(booking.clone()))
    }

    async fn mark_cancelled(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        if !matches!(
            booking.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        ) {
            return Ok(TransitionOutcome::Rejected(booking.clone()));
        }
        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(at);
        Ok(TransitionOutcome::Applied(booking.clone()))
    }

    async fn count_in_period(&self, cafe_id: Uuid, period_start: DateTime<Utc>) -> AppResult<u32> {
        Ok(self
            .bookings
            .lock()
            .await
            .values()
            .filter(|b| {
                b.cafe_id == cafe_id
                    && b.status != BookingStatus::Cancelled
                    && b.created_at >= period_start
            })
            .count() as u32)
    }
}

// -- Payment store --

#[derive(Default)]
pub struct MemoryPaymentStore {
    payments: Mutex<HashMap<Uuid, Payment>>,
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn record_captured(
        &self,
        booking_id: Uuid,
        amount: Decimal,
        gateway_reference: Option<&str>,
    ) -> AppResult<Payment> {
        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: Some(booking_id),
            subscription_id: None,
            amount,
            status: PaymentStatus::Paid,
            gateway_reference: gateway_reference.map(String::from),
            created_at: Utc::now(),
            refunded_at: None,
        };
        self.payments
            .lock()
            .await
            .insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_paid_by_booking(&self, booking_id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .await
            .values()
            .find(|p| p.booking_id == Some(booking_id) && p.status == PaymentStatus::Paid)
            .cloned())
    }

    async fn mark_refunded(&self, id: Uuid) -> AppResult<Option<Payment>> {
        let mut payments = self.payments.lock().await;
        match payments.get_mut(&id) {
            Some(p) if p.status == PaymentStatus::Paid => {
                p.status = PaymentStatus::Refunded;
                p.refunded_at = Some(Utc::now());
                Ok(Some(p.clone()))
            }
            _ => Ok(None),
        }
    }
}

// -- Subscription store --

#[derive(Default)]
pub struct MemorySubscriptionStore {
    subs: Mutex<HashMap<Uuid, ActiveSubscription>>,
}

impl MemorySubscriptionStore {
    pub async fn insert(&self, sub: ActiveSubscription) {
        self.subs
            .lock()
            .await
            .insert(sub.subscription.cafe_id, sub);
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn find_active(
        &self,
        cafe_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActiveSubscription>> {
        Ok(self
            .subs
            .lock()
            .await
            .get(&cafe_id)
            .filter(|s| s.subscription.is_active(now))
            .cloned())
    }
}

// -- Usage store --

/// Fixed usage counts for enforcement tests.
#[derive(Default)]
pub struct FixedUsageStore {
    pub branches: u32,
    pub matches: u32,
    pub staff: u32,
    pub offers: u32,
}

#[async_trait]
impl UsageStore for FixedUsageStore {
    async fn count_branches(&self, _cafe_id: Uuid) -> AppResult<u32> {
        Ok(self.branches)
    }

    async fn count_matches_in_period(
        &self,
        _cafe_id: Uuid,
        _period_start: DateTime<Utc>,
    ) -> AppResult<u32> {
        Ok(self.matches)
    }

    async fn count_staff(&self, _cafe_id: Uuid) -> AppResult<u32> {
        Ok(self.staff)
    }

    async fn count_offers(&self, _cafe_id: Uuid) -> AppResult<u32> {
        Ok(self.offers)
    }
}

// -- Loyalty store --

#[derive(Default)]
pub struct MemoryLoyaltyStore {
    cards: Mutex<HashMap<Uuid, LoyaltyCard>>,
    transactions: Mutex<Vec<LoyaltyTransaction>>,
}

impl MemoryLoyaltyStore {
    pub async fn transactions(&self) -> Vec<LoyaltyTransaction> {
        self.transactions.lock().await.clone()
    }
}

#[async_trait]
impl LoyaltyStore for MemoryLoyaltyStore {
    async fn find_card(&self, user_id: Uuid) -> AppResult<Option<LoyaltyCard>> {
        Ok(self.cards.lock().await.get(&user_id).cloned())
    }

    async fn apply(
        &self,
        data: &CreateLoyaltyTransaction,
        thresholds: &TierThresholds,
    ) -> AppResult<LoyaltyCard> {
        let mut cards = self.cards.lock().await;
        let card = cards.entry(data.user_id).or_insert_with(|| LoyaltyCard {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            points_balance: 0,
            lifetime_points: 0,
            tier: LoyaltyTier::Bronze,
            updated_at: Utc::now(),
        });

        let moved = match data.kind {
            LoyaltyTransactionKind::Earn => {
                card.points_balance += data.points;
                card.lifetime_points += data.points;
                data.points
            }
            LoyaltyTransactionKind::Clawback => {
                let moved = data.points.min(card.points_balance);
                card.points_balance -= moved;
                moved
            }
            LoyaltyTransactionKind::Redeem => {
                if card.points_balance < data.points {
                    return Err(AppError::conflict(format!(
                        "Insufficient points: balance {} < {}",
                        card.points_balance, data.points
                    )));
                }
                card.points_balance -= data.points;
                data.points
            }
        };

        card.tier = LoyaltyTier::for_lifetime_points(card.lifetime_points as u32, thresholds);
        card.updated_at = Utc::now();

        self.transactions.lock().await.push(LoyaltyTransaction {
            id: Uuid::new_v4(),
            card_id: card.id,
            booking_id: data.booking_id,
            kind: data.kind,
            points: moved,
            created_at: Utc::now(),
        });

        Ok(card.clone())
    }

    async fn find_earned_for_booking(
        &self,
        booking_id: Uuid,
    ) -> AppResult<Option<LoyaltyTransaction>> {
        Ok(self
            .transactions
            .lock()
            .await
            .iter()
            .find(|t| t.booking_id == Some(booking_id) && t.kind == LoyaltyTransactionKind::Earn)
            .cloned())
    }
}

// -- Scan log store --

#[derive(Default)]
pub struct MemoryScanLogStore {
    logs: Mutex<Vec<ScanLog>>,
}

impl MemoryScanLogStore {
    pub async fn logs(&self) -> Vec<ScanLog> {
        self.logs.lock().await.clone()
    }
}

#[async_trait]
impl ScanLogStore for MemoryScanLogStore {
    async fn append(&self, data: &CreateScanLog) -> AppResult<ScanLog> {
        let log = ScanLog {
            id: Uuid::new_v4(),
            cafe_id: data.cafe_id,
            scanned_code: data.scanned_code.clone(),
            booking_id: data.booking_id,
            outcome: data.outcome,
            scanned_by: data.scanned_by,
            scanned_at: Utc::now(),
        };
        self.logs.lock().await.push(log.clone());
        Ok(log)
    }

    async fn list_recent(&self, cafe_id: Uuid, limit: u32) -> AppResult<Vec<ScanLog>> {
        let mut logs: Vec<ScanLog> = self
            .logs
            .lock()
            .await
            .iter()
            .filter(|l| l.cafe_id == cafe_id)
            .cloned()
            .collect();
        logs.sort_by_key(|l| std::cmp::Reverse(l.scanned_at));
        logs.truncate(limit as usize);
        Ok(logs)
    }
}

// -- Fixtures --

pub fn cafe(status: CafeStatus) -> Cafe {
    Cafe {
        id: Uuid::new_v4(),
        name: "Lion's Den Sports Cafe".to_string(),
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn branch(cafe_id: Uuid) -> Branch {
    Branch {
        id: Uuid::new_v4(),
        cafe_id,
        name: "Downtown".to_string(),
        address: None,
        total_capacity: 80,
        created_at: Utc::now(),
    }
}

pub fn published_match(cafe_id: Uuid, branch_id: Uuid, capacity: i32) -> GameMatch {
    GameMatch {
        id: Uuid::new_v4(),
        cafe_id,
        branch_id,
        title: "Arsenal vs Chelsea".to_string(),
        kickoff_at: Utc::now() + Duration::days(2),
        status: MatchStatus::Upcoming,
        published: true,
        seat_price: Decimal::new(1000, 2),
        capacity,
        created_at: Utc::now(),
    }
}

pub fn seat(label: &str, surcharge: Decimal) -> SeatWithSurcharge {
    SeatWithSurcharge {
        id: Uuid::new_v4(),
        section_id: Uuid::new_v4(),
        label: label.to_string(),
        section_name: "Main".to_string(),
        price_override: None,
        price_surcharge: surcharge,
    }
}

pub fn plan(max_bookings_per_month: Option<i32>) -> SubscriptionPlan {
    SubscriptionPlan {
        id: Uuid::new_v4(),
        name: "Pro".to_string(),
        price_per_month: Decimal::new(4900, 2),
        max_branches: Some(3),
        max_matches_per_month: Some(20),
        max_staff: Some(10),
        max_offers: Some(5),
        max_bookings_per_month,
    }
}

pub fn active_subscription(cafe_id: Uuid, plan: SubscriptionPlan) -> ActiveSubscription {
    let now = Utc::now();
    ActiveSubscription {
        subscription: CafeSubscription {
            id: Uuid::new_v4(),
            cafe_id,
            plan_id: plan.id,
            started_at: now - Duration::days(5),
            expires_at: now + Duration::days(25),
            auto_renew: true,
            created_at: now - Duration::days(5),
        },
        plan,
    }
}

// -- Assembled environment --

/// A booking service wired to in-memory collaborators, plus handles to
/// each of them for seeding and assertions.
pub struct TestEnv {
    pub inventory: MemorySeatInventory,
    pub bookings: Arc<MemoryBookingStore>,
    pub matches: Arc<MemoryMatchStore>,
    pub seats: Arc<MemorySeatStore>,
    pub cafes: Arc<MemoryCafeStore>,
    pub payments: Arc<MemoryPaymentStore>,
    pub subscriptions: Arc<MemorySubscriptionStore>,
    pub loyalty_store: Arc<MemoryLoyaltyStore>,
    pub publisher: Arc<CapturingPublisher>,
    pub service: BookingService,
}

impl TestEnv {
    pub fn new() -> Self {
        let inventory = MemorySeatInventory::new();
        let bookings = Arc::new(MemoryBookingStore::default());
        let matches = Arc::new(MemoryMatchStore::default());
        let seats = Arc::new(MemorySeatStore::default());
        let cafes = Arc::new(MemoryCafeStore::default());
        let payments = Arc::new(MemoryPaymentStore::default());
        let subscriptions = Arc::new(MemorySubscriptionStore::default());
        let loyalty_store = Arc::new(MemoryLoyaltyStore::default());
        let publisher = Arc::new(CapturingPublisher::new());

        let loyalty = LoyaltyService::new(
            loyalty_store.clone(),
            publisher.clone(),
            LoyaltyConfig::default(),
        );
        let service = BookingService::new(
            Arc::new(inventory.clone()),
            bookings.clone(),
            matches.clone(),
            seats.clone(),
            cafes.clone(),
            payments.clone(),
            subscriptions.clone(),
            loyalty,
            publisher.clone(),
            BookingConfig::default(),
        );

        Self {
            inventory,
            bookings,
            matches,
            seats,
            cafes,
            payments,
            subscriptions,
            loyalty_store,
            publisher,
            service,
        }
    }

    /// Seed an active cafe with one branch, a published match, and the
    /// given seats, under a plan capped at `max_bookings_per_month`.
    pub async fn seed_match(
        &self,
        seat_fixtures: Vec<SeatWithSurcharge>,
        capacity: i32,
        max_bookings_per_month: Option<i32>,
    ) -> (GameMatch, Vec<Uuid>) {
        let cafe = cafe(CafeStatus::Active);
        let branch = branch(cafe.id);
        let game_match = published_match(cafe.id, branch.id, capacity);

        let seat_ids: Vec<Uuid> = seat_fixtures.iter().map(|s| s.id).collect();
        for fixture in seat_fixtures {
            self.seats.insert(branch.id, fixture).await;
        }
        self.inventory
            .register_match(game_match.id, seat_ids.clone(), capacity as u32)
            .await;

        self.cafes.insert(cafe.clone()).await;
        self.cafes.insert_branch(branch).await;
        self.matches.insert(game_match.clone()).await;
        self.subscriptions
            .insert(active_subscription(cafe.id, plan(max_bookings_per_month)))
            .await;

        (game_match, seat_ids)
    }
}

//! Booking lifecycle orchestration.
//!
//! Creation follows reserve-then-count: seats are taken from the
//! inventory first, then the booking row is inserted under the plan's
//! monthly quota. If the quota check loses, the reservation is released
//! as compensation, so no seats leak.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use matchday_core::config::booking::BookingConfig;
use matchday_core::error::AppError;
use matchday_core::error::ErrorKind;
use matchday_core::events::{BookingEvent, EventPayload, PlatformEvent, SubscriptionEvent};
use matchday_core::traits::event_publisher::EventPublisher;
use matchday_core::traits::seat_inventory::{
    ReservationDenied, ReservationOutcome, SeatInventory,
};
use matchday_database::repositories::{
    BookingCreateOutcome, BookingStore, CafeStore, MatchStore, PaymentStore, SeatStore,
    SubscriptionStore, TransitionOutcome,
};
use matchday_entity::booking::{Booking, BookingStatus, CreateBooking, code};

use crate::error::{BookingError, BookingResult};
use crate::loyalty::LoyaltyService;
use crate::subscription::billing_period_start;

/// A fan's request to book seats for a match.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    /// The booking fan.
    pub user_id: Uuid,
    /// Display name for the check-in screen.
    pub customer_name: Option<String>,
    /// The match to book.
    pub match_id: Uuid,
    /// The requested seats.
    pub seat_ids: Vec<Uuid>,
    /// Guests attending. Must not exceed the requested seats.
    pub guest_count: u32,
}

/// Outcome of a check-in attempt.
#[derive(Debug, Clone)]
pub enum CheckIn {
    /// This call performed the admission.
    Admitted(Booking),
    /// The booking was already checked in; the original admission
    /// stands untouched.
    AlreadyCheckedIn(Booking),
}

/// Service implementing the booking lifecycle.
#[derive(Clone)]
pub struct BookingService {
    inventory: Arc<dyn SeatInventory>,
    bookings: Arc<dyn BookingStore>,
    matches: Arc<dyn MatchStore>,
    seats: Arc<dyn SeatStore>,
    cafes: Arc<dyn CafeStore>,
    payments: Arc<dyn PaymentStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    loyalty: LoyaltyService,
    publisher: Arc<dyn EventPublisher>,
    config: BookingConfig,
}

impl BookingService {
    /// Creates a new booking service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        inventory: Arc<dyn SeatInventory>,
        bookings: Arc<dyn BookingStore>,
        matches: Arc<dyn MatchStore>,
        seats: Arc<dyn SeatStore>,
        cafes: Arc<dyn CafeStore>,
        payments: Arc<dyn PaymentStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        loyalty: LoyaltyService,
        publisher: Arc<dyn EventPublisher>,
        config: BookingConfig,
    ) -> Self {
        Self {
            inventory,
            bookings,
            matches,
            seats,
            cafes,
            payments,
            subscriptions,
            loyalty,
            publisher,
            config,
        }
    }

    /// Create a pending booking, reserving its seats.
    pub async fn create(&self, request: CreateBookingRequest) -> BookingResult<Booking> {
        if request.guest_count == 0 {
            return Err(AppError::validation("At least one guest is required").into());
        }

        let game_match = self
            .matches
            .find(request.match_id)
            .await?
            .filter(|m| m.is_bookable())
            .ok_or(BookingError::MatchNotBookable {
                match_id: request.match_id,
            })?;

        let cafe = self
            .cafes
            .find(game_match.cafe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Cafe {} not found", game_match.cafe_id)))?;
        if !cafe.can_receive_bookings() {
            return Err(BookingError::CafeSuspended { cafe_id: cafe.id });
        }

        let subscription = self
            .subscriptions
            .find_active(cafe.id, Utc::now())
            .await?
            .ok_or(BookingError::NoActiveSubscription { cafe_id: cafe.id })?;
        let limit = subscription.plan.booking_limit();

        let resolved = self
            .seats
            .find_with_sections(game_match.branch_id, &request.seat_ids)
            .await?;
        if resolved.len() != request.seat_ids.len() {
            let found: Vec<Uuid> = resolved.iter().map(|s| s.id).collect();
            let missing = request
                .seat_ids
                .iter()
                .copied()
                .filter(|id| !found.contains(id))
                .collect();
            return Err(BookingError::SeatsUnknown { seat_ids: missing });
        }

        let price = super::pricing::price_booking(
            &resolved,
            game_match.seat_price,
            self.config.service_fee,
        );

        let booking_id = Uuid::new_v4();
        match self
            .inventory
            .reserve(
                game_match.id,
                booking_id,
                &request.seat_ids,
                request.guest_count,
            )
            .await?
        {
            ReservationOutcome::Reserved(_) => {}
            ReservationOutcome::Denied(denied) => return Err(denied.into()),
        }

        let data = CreateBooking {
            id: booking_id,
            code: code::generate_booking_code(self.config.code_length),
            qr_token: code::generate_qr_token(self.config.qr_token_bytes),
            user_id: request.user_id,
            customer_name: request.customer_name,
            cafe_id: cafe.id,
            branch_id: game_match.branch_id,
            match_id: game_match.id,
            guest_count: request.guest_count as i32,
            subtotal: price.subtotal,
            service_fee: price.service_fee,
            total: price.total,
        };

        let period_start = billing_period_start(Utc::now());
        let booking = match self
            .bookings
            .create_under_limit(&data, limit, period_start)
            .await
        {
            Ok(BookingCreateOutcome::Created(booking)) => booking,
            Ok(BookingCreateOutcome::LimitExceeded { limit, current }) => {
                self.release_quietly(game_match.id, booking_id).await;
                let event = PlatformEvent::new(
                    Some(request.user_id),
                    EventPayload::Subscription(SubscriptionEvent::LimitReached {
                        cafe_id: cafe.id,
                        resource: "bookings_per_month".to_string(),
                        limit,
                        current,
                    }),
                );
                if let Err(e) = self.publisher.publish(event).await {
                    warn!(error = %e, "Failed to publish limit event");
                }
                return Err(BookingError::QuotaExhausted { limit, current });
            }
            Err(e) => {
                self.release_quietly(game_match.id, booking_id).await;
                return Err(e.into());
            }
        };

        info!(
            booking_id = %booking.id,
            code = %booking.code,
            match_id = %booking.match_id,
            seats = request.seat_ids.len(),
            total = %booking.total,
            "Booking created"
        );
        self.emit(
            request.user_id,
            BookingEvent::Created {
                booking_id: booking.id,
                match_id: booking.match_id,
                user_id: booking.user_id,
                seat_count: request.seat_ids.len() as u32,
                total: booking.total,
            },
        )
        .await;

        Ok(booking)
    }

    /// Confirm a pending booking after payment capture.
    pub async fn confirm(
        &self,
        booking_id: Uuid,
        gateway_reference: Option<&str>,
    ) -> BookingResult<Booking> {
        let booking = match self.bookings.mark_confirmed(booking_id, Utc::now()).await {
            Ok(TransitionOutcome::Applied(booking)) => booking,
            Ok(TransitionOutcome::Rejected(booking)) => {
                return Err(BookingError::InvalidState {
                    booking_id,
                    status: booking.status,
                });
            }
            Err(e) if matches!(e.kind, ErrorKind::NotFound) => {
                return Err(BookingError::NotFound { booking_id });
            }
            Err(e) => return Err(e.into()),
        };

        self.payments
            .record_captured(booking.id, booking.total, gateway_reference)
            .await?;

        self.loyalty
            .award_for_booking(booking.user_id, booking.id, booking.total)
            .await?;

        info!(booking_id = %booking.id, total = %booking.total, "Booking confirmed");
        self.emit(
            booking.user_id,
            BookingEvent::Confirmed {
                booking_id: booking.id,
                user_id: booking.user_id,
            },
        )
        .await;

        Ok(booking)
    }

    /// Check in a confirmed booking at the door.
    ///
    /// A second check-in reports the existing admission without
    /// touching `checked_in_at`.
    pub async fn check_in(&self, booking_id: Uuid) -> BookingResult<CheckIn> {
        let outcome = match self.bookings.mark_checked_in(booking_id, Utc::now()).await {
            Ok(outcome) => outcome,
            Err(e) if matches!(e.kind, ErrorKind::NotFound) => {
                return Err(BookingError::NotFound { booking_id });
            }
            Err(e) => return Err(e.into()),
        };

        match outcome {
            TransitionOutcome::Applied(booking) => {
                info!(booking_id = %booking.id, code = %booking.code, "Booking checked in");
                self.emit(
                    booking.user_id,
                    BookingEvent::CheckedIn {
                        booking_id: booking.id,
                        checked_in_at: booking.checked_in_at.unwrap_or_else(Utc::now),
                    },
                )
                .await;
                Ok(CheckIn::Admitted(booking))
            }
            TransitionOutcome::Rejected(booking)
                if booking.status == BookingStatus::CheckedIn =>
            {
                Ok(CheckIn::AlreadyCheckedIn(booking))
            }
            TransitionOutcome::Rejected(booking) => Err(BookingError::InvalidState {
                booking_id,
                status: booking.status,
            }),
        }
    }

    /// Cancel a pending or confirmed booking, releasing its seats and
    /// refunding any captured payment.
    pub async fn cancel(&self, booking_id: Uuid) -> BookingResult<Booking> {
        let booking = match self.bookings.mark_cancelled(booking_id, Utc::now()).await {
            Ok(TransitionOutcome::Applied(booking)) => booking,
            Ok(TransitionOutcome::Rejected(booking)) => {
                return Err(BookingError::InvalidState {
                    booking_id,
                    status: booking.status,
                });
            }
            Err(e) if matches!(e.kind, ErrorKind::NotFound) => {
                return Err(BookingError::NotFound { booking_id });
            }
            Err(e) => return Err(e.into()),
        };

        self.inventory.release(booking.match_id, booking.id).await?;

        let refunded = match self.payments.find_paid_by_booking(booking.id).await? {
            Some(payment) => self
                .payments
                .mark_refunded(payment.id)
                .await?
                .map(|p| p.amount),
            None => None,
        };

        self.loyalty
            .claw_back_for_booking(booking.user_id, booking.id)
            .await?;

        info!(
            booking_id = %booking.id,
            refunded = ?refunded,
            "Booking cancelled"
        );
        self.emit(
            booking.user_id,
            BookingEvent::Cancelled {
                booking_id: booking.id,
                user_id: booking.user_id,
                refunded,
            },
        )
        .await;

        Ok(booking)
    }

    /// Find a booking by ID.
    pub async fn find(&self, booking_id: Uuid) -> BookingResult<Booking> {
        self.bookings
            .find(booking_id)
            .await?
            .ok_or(BookingError::NotFound { booking_id })
    }

    async fn release_quietly(&self, match_id: Uuid, booking_id: Uuid) {
        if let Err(e) = self.inventory.release(match_id, booking_id).await {
            warn!(error = %e, %match_id, %booking_id, "Failed to release seats during compensation");
        }
    }

    async fn emit(&self, actor_id: Uuid, event: BookingEvent) {
        let event = PlatformEvent::new(Some(actor_id), EventPayload::Booking(event));
        if let Err(e) = self.publisher.publish(event).await {
            warn!(error = %e, "Failed to publish booking event");
        }
    }
}

impl From<ReservationDenied> for BookingError {
    fn from(denied: ReservationDenied) -> Self {
        match denied {
            ReservationDenied::SeatUnavailable { seat_ids } => {
                BookingError::SeatsUnavailable { seat_ids }
            }
            ReservationDenied::SeatNotFound { seat_ids } => {
                BookingError::SeatsUnknown { seat_ids }
            }
            ReservationDenied::CapacityExceeded {
                requested,
                available,
            } => BookingError::CapacityExceeded {
                requested,
                available,
            },
        }
    }
}

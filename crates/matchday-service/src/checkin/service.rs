//! Door scan handling.
//!
//! Every scan is appended to the scan log, including rejected ones.
//! A booking belonging to another cafe is reported exactly like an
//! unknown code, so a scanner cannot probe other tenants' bookings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matchday_core::error::AppError;
use matchday_core::result::AppResult;
use matchday_database::repositories::{BookingStore, CafeStore, MatchStore, ScanLogStore};
use matchday_entity::booking::{Booking, BookingStatus};
use matchday_entity::scan::{CreateScanLog, ScanOutcome};
use matchday_entity::staff::Capability;

use crate::access::CapabilityEnforcer;
use crate::booking::{BookingService, CheckIn};
use crate::context::RequestContext;
use crate::error::BookingError;

/// What the check-in screen shows after a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingView {
    /// The human-readable booking code.
    pub code: String,
    /// Display name of the fan.
    pub customer_name: Option<String>,
    /// Guests to admit.
    pub guest_count: i32,
    /// The booked match.
    pub match_id: Uuid,
    /// Fixture title for the screen.
    pub match_title: String,
    /// Kickoff time of the booked match.
    pub kickoff_at: DateTime<Utc>,
    /// The hosting branch's name.
    pub branch_name: String,
    /// Lifecycle status after the scan.
    pub status: BookingStatus,
    /// When the booking was checked in, if it has been.
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Result of a door scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// What happened.
    pub outcome: ScanOutcome,
    /// The booking the code resolved to, absent on rejection.
    pub booking: Option<BookingView>,
}

/// Service handling QR scans at the door.
#[derive(Clone)]
pub struct CheckInService {
    bookings: Arc<dyn BookingStore>,
    lifecycle: BookingService,
    matches: Arc<dyn MatchStore>,
    cafes: Arc<dyn CafeStore>,
    scan_log: Arc<dyn ScanLogStore>,
    enforcer: CapabilityEnforcer,
}

impl CheckInService {
    /// Creates a new check-in service.
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        lifecycle: BookingService,
        matches: Arc<dyn MatchStore>,
        cafes: Arc<dyn CafeStore>,
        scan_log: Arc<dyn ScanLogStore>,
        enforcer: CapabilityEnforcer,
    ) -> Self {
        Self {
            bookings,
            lifecycle,
            matches,
            cafes,
            scan_log,
            enforcer,
        }
    }

    /// Handle a scanned code for the acting staff member's cafe.
    ///
    /// Scanning an already-checked-in booking is reported as
    /// `AlreadyCheckedIn` with the original admission time; the booking
    /// is never admitted twice.
    pub async fn scan(&self, ctx: &RequestContext, scanned_code: &str) -> AppResult<ScanResult> {
        self.enforcer.require(ctx, Capability::CheckInBookings)?;

        let booking = self
            .bookings
            .find_by_code(scanned_code)
            .await?
            .filter(|b| b.cafe_id == ctx.cafe_id);

        let Some(booking) = booking else {
            self.log_scan(ctx, scanned_code, None, ScanOutcome::Rejected)
                .await?;
            return Ok(ScanResult {
                outcome: ScanOutcome::Rejected,
                booking: None,
            });
        };

        let (outcome, booking) = match booking.status {
            BookingStatus::Confirmed | BookingStatus::CheckedIn => {
                match self.lifecycle.check_in(booking.id).await {
                    Ok(CheckIn::Admitted(updated)) => (ScanOutcome::CheckedIn, updated),
                    Ok(CheckIn::AlreadyCheckedIn(current)) => {
                        (ScanOutcome::AlreadyCheckedIn, current)
                    }
                    // Raced into a state that no longer admits, e.g. a
                    // cancellation between lookup and transition.
                    Err(BookingError::InvalidState { .. } | BookingError::NotFound { .. }) => {
                        (ScanOutcome::Rejected, booking)
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            BookingStatus::Pending | BookingStatus::Cancelled => {
                (ScanOutcome::Rejected, booking)
            }
        };

        self.log_scan(ctx, scanned_code, Some(booking.id), outcome)
            .await?;

        let view = self.view(&booking).await?;
        Ok(ScanResult {
            outcome,
            booking: Some(view),
        })
    }

    /// Denormalizes the booking for the check-in screen.
    async fn view(&self, booking: &Booking) -> AppResult<BookingView> {
        let game_match = self
            .matches
            .find(booking.match_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("booking {} references a missing match", booking.id))
            })?;
        let branch = self.cafes.find_branch(booking.branch_id).await?.ok_or_else(|| {
            AppError::internal(format!("booking {} references a missing branch", booking.id))
        })?;

        Ok(BookingView {
            code: booking.code.clone(),
            customer_name: booking.customer_name.clone(),
            guest_count: booking.guest_count,
            match_id: booking.match_id,
            match_title: game_match.title,
            kickoff_at: game_match.kickoff_at,
            branch_name: branch.name,
            status: booking.status,
            checked_in_at: booking.checked_in_at,
        })
    }

    async fn log_scan(
        &self,
        ctx: &RequestContext,
        scanned_code: &str,
        booking_id: Option<Uuid>,
        outcome: ScanOutcome,
    ) -> AppResult<()> {
        self.scan_log
            .append(&CreateScanLog {
                cafe_id: ctx.cafe_id,
                scanned_code: scanned_code.to_string(),
                booking_id,
                outcome,
                scanned_by: ctx.staff_id,
            })
            .await?;
        Ok(())
    }
}

//! In-memory seat inventory using a Tokio mutex for single-node deployments.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use matchday_core::error::AppError;
use matchday_core::result::AppResult;
use matchday_core::traits::seat_inventory::{
    Reservation, ReservationDenied, ReservationOutcome, SeatInventory,
};

/// Per-match reservation state.
#[derive(Debug)]
struct MatchState {
    /// Every seat id in the match's branch.
    seats: HashSet<Uuid>,
    /// Maximum guests admitted.
    capacity: u32,
    /// Seats held per booking.
    holds: HashMap<Uuid, Vec<Uuid>>,
    /// Seats currently taken across all bookings.
    taken: HashSet<Uuid>,
}

/// In-memory seat inventory using a Tokio mutex for thread safety.
///
/// Suitable for single-node deployments only. Matches must be
/// registered before reservations are attempted against them.
#[derive(Debug, Clone, Default)]
pub struct MemorySeatInventory {
    /// Protected per-match state.
    state: Arc<Mutex<HashMap<Uuid, MatchState>>>,
}

impl MemorySeatInventory {
    /// Creates a new empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a match with its branch seat map and capacity.
    ///
    /// Re-registering an existing match replaces its seat map but keeps
    /// current holds.
    pub async fn register_match(&self, match_id: Uuid, seat_ids: Vec<Uuid>, capacity: u32) {
        let mut state = self.state.lock().await;
        let entry = state.entry(match_id).or_insert_with(|| MatchState {
            seats: HashSet::new(),
            capacity,
            holds: HashMap::new(),
            taken: HashSet::new(),
        });
        entry.seats = seat_ids.into_iter().collect();
        entry.capacity = capacity;
    }
}

#[async_trait]
impl SeatInventory for MemorySeatInventory {
    async fn reserve(
        &self,
        match_id: Uuid,
        booking_id: Uuid,
        seat_ids: &[Uuid],
        guest_count: u32,
    ) -> AppResult<ReservationOutcome> {
        if seat_ids.is_empty() {
            return Err(AppError::validation("At least one seat must be requested"));
        }
        if guest_count as usize > seat_ids.len() {
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::CapacityExceeded {
                    requested: guest_count,
                    available: seat_ids.len() as u32,
                },
            ));
        }

        let mut state = self.state.lock().await;
        let entry = state
            .get_mut(&match_id)
            .ok_or_else(|| AppError::not_found(format!("Match {match_id} not registered")))?;

        let unknown: Vec<Uuid> = seat_ids
            .iter()
            .copied()
            .filter(|id| !entry.seats.contains(id))
            .collect();
        if !unknown.is_empty() {
            return Ok(ReservationOutcome::Denied(ReservationDenied::SeatNotFound {
                seat_ids: unknown,
            }));
        }

        // Seat conflicts take precedence over the capacity comparison,
        // even when the match is full.
        let conflicts: Vec<Uuid> = seat_ids
            .iter()
            .copied()
            .filter(|id| entry.taken.contains(id))
            .collect();
        if !conflicts.is_empty() {
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::SeatUnavailable {
                    seat_ids: conflicts,
                },
            ));
        }

        let available = entry.capacity.saturating_sub(entry.taken.len() as u32);
        if seat_ids.len() as u32 > available {
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::CapacityExceeded {
                    requested: guest_count,
                    available,
                },
            ));
        }

        entry.taken.extend(seat_ids.iter().copied());
        entry.holds.insert(booking_id, seat_ids.to_vec());
        info!(
            %match_id,
            %booking_id,
            seats = seat_ids.len(),
            taken = entry.taken.len(),
            "Seats reserved"
        );

        Ok(ReservationOutcome::Reserved(Reservation {
            match_id,
            booking_id,
            seat_ids: seat_ids.to_vec(),
            reserved_at: Utc::now(),
        }))
    }

    async fn release(&self, match_id: Uuid, booking_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let Some(entry) = state.get_mut(&match_id) else {
            warn!(%match_id, %booking_id, "Release for unregistered match, ignoring");
            return Ok(());
        };

        if let Some(held) = entry.holds.remove(&booking_id) {
            for seat_id in &held {
                entry.taken.remove(seat_id);
            }
            info!(
                %match_id,
                %booking_id,
                seats = held.len(),
                taken = entry.taken.len(),
                "Seats released"
            );
        } else {
            warn!(%match_id, %booking_id, "Release with no active hold, ignoring");
        }

        Ok(())
    }
}

//! Seat inventory behavior under contention.

use uuid::Uuid;

use matchday_core::traits::seat_inventory::{
    ReservationDenied, ReservationOutcome, SeatInventory,
};
use matchday_service::MemorySeatInventory;

async fn registered(seat_count: usize, capacity: u32) -> (MemorySeatInventory, Uuid, Vec<Uuid>) {
    let inventory = MemorySeatInventory::new();
    let match_id = Uuid::new_v4();
    let seats: Vec<Uuid> = (0..seat_count).map(|_| Uuid::new_v4()).collect();
    inventory
        .register_match(match_id, seats.clone(), capacity)
        .await;
    (inventory, match_id, seats)
}

#[tokio::test]
async fn test_concurrent_overlapping_requests_exactly_one_wins() {
    let (inventory, match_id, seats) = registered(4, 4).await;
    let shared = seats[1];

    let a = {
        let inventory = inventory.clone();
        let request = vec![seats[0], shared];
        tokio::spawn(
            async move { inventory.reserve(match_id, Uuid::new_v4(), &request, 2).await },
        )
    };
    let b = {
        let inventory = inventory.clone();
        let request = vec![shared, seats[2]];
        tokio::spawn(
            async move { inventory.reserve(match_id, Uuid::new_v4(), &request, 2).await },
        )
    };

    let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];
    let reserved = outcomes
        .iter()
        .filter(|o| matches!(o, ReservationOutcome::Reserved(_)))
        .count();
    assert_eq!(reserved, 1, "exactly one of two overlapping requests wins");

    let denied = outcomes
        .iter()
        .find_map(|o| match o {
            ReservationOutcome::Denied(d) => Some(d.clone()),
            _ => None,
        })
        .unwrap();
    // Only the contested seat is reported, not the loser's whole request.
    assert_eq!(
        denied,
        ReservationDenied::SeatUnavailable {
            seat_ids: vec![shared]
        }
    );
}

#[tokio::test]
async fn test_release_makes_seats_reservable_again() {
    let (inventory, match_id, seats) = registered(2, 2).await;
    let first = Uuid::new_v4();

    let outcome = inventory.reserve(match_id, first, &seats, 2).await.unwrap();
    assert!(matches!(outcome, ReservationOutcome::Reserved(_)));

    inventory.release(match_id, first).await.unwrap();

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats, 2)
        .await
        .unwrap();
    assert!(matches!(outcome, ReservationOutcome::Reserved(_)));
}

#[tokio::test]
async fn test_release_without_hold_is_a_no_op() {
    let (inventory, match_id, _) = registered(2, 2).await;
    inventory.release(match_id, Uuid::new_v4()).await.unwrap();
    // Unregistered match too.
    inventory
        .release(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_more_guests_than_seats_is_denied() {
    let (inventory, match_id, seats) = registered(2, 10).await;
    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats[..1], 3)
        .await
        .unwrap();
    assert_eq!(
        extract_denial(outcome),
        ReservationDenied::CapacityExceeded {
            requested: 3,
            available: 1
        }
    );
}

#[tokio::test]
async fn test_capacity_is_enforced_across_bookings() {
    let (inventory, match_id, seats) = registered(3, 2).await;

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats[..2], 2)
        .await
        .unwrap();
    assert!(matches!(outcome, ReservationOutcome::Reserved(_)));

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats[2..], 1)
        .await
        .unwrap();
    assert_eq!(
        extract_denial(outcome),
        ReservationDenied::CapacityExceeded {
            requested: 1,
            available: 0
        }
    );
}

#[tokio::test]
async fn test_unknown_seat_ids_are_listed() {
    let (inventory, match_id, seats) = registered(2, 2).await;
    let stranger = Uuid::new_v4();

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &[seats[0], stranger], 2)
        .await
        .unwrap();
    assert_eq!(
        extract_denial(outcome),
        ReservationDenied::SeatNotFound {
            seat_ids: vec![stranger]
        }
    );
}

#[tokio::test]
async fn test_full_match_still_names_the_contested_seats() {
    // Capacity 2, one seat already held: an overlapping request must be
    // denied for the overlap, not the headroom, so the caller can offer
    // the remaining seat instead.
    let (inventory, match_id, seats) = registered(2, 2).await;
    let holder = Uuid::new_v4();
    inventory
        .reserve(match_id, holder, &seats[..1], 1)
        .await
        .unwrap();

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats, 2)
        .await
        .unwrap();
    assert_eq!(
        extract_denial(outcome),
        ReservationDenied::SeatUnavailable {
            seat_ids: vec![seats[0]]
        }
    );

    // After the holder releases, the identical request goes through.
    inventory.release(match_id, holder).await.unwrap();
    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &seats, 2)
        .await
        .unwrap();
    assert!(matches!(outcome, ReservationOutcome::Reserved(_)));
}

#[tokio::test]
async fn test_denied_request_reserves_nothing() {
    let (inventory, match_id, seats) = registered(3, 3).await;
    let winner = Uuid::new_v4();
    inventory
        .reserve(match_id, winner, &seats[..1], 1)
        .await
        .unwrap();

    // Loser asks for a free seat plus the taken one; the free seat must
    // remain free afterwards.
    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &[seats[0], seats[1]], 2)
        .await
        .unwrap();
    assert!(matches!(outcome, ReservationOutcome::Denied(_)));

    let outcome = inventory
        .reserve(match_id, Uuid::new_v4(), &[seats[1]], 1)
        .await
        .unwrap();
    assert!(matches!(outcome, ReservationOutcome::Reserved(_)));
}

fn extract_denial(outcome: ReservationOutcome) -> ReservationDenied {
    match outcome {
        ReservationOutcome::Denied(denied) => denied,
        other => panic!("expected denial, got {other:?}"),
    }
}

//! Booking price computation.

use rust_decimal::Decimal;

use matchday_entity::branch::SeatWithSurcharge;

/// The computed price breakdown for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPrice {
    /// Sum of the per-seat prices.
    pub subtotal: Decimal,
    /// The fixed service fee.
    pub service_fee: Decimal,
    /// `subtotal + service_fee`.
    pub total: Decimal,
}

/// Price a set of seats for a match.
///
/// A seat's price is its explicit override when one is set; otherwise
/// the match's base price plus the seat's section surcharge.
pub fn price_booking(
    seats: &[SeatWithSurcharge],
    base_price: Decimal,
    service_fee: Decimal,
) -> BookingPrice {
    let subtotal: Decimal = seats
        .iter()
        .map(|seat| {
            seat.price_override
                .unwrap_or(base_price + seat.price_surcharge)
        })
        .sum();

    BookingPrice {
        subtotal,
        service_fee,
        total: subtotal + service_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn seat(price_override: Option<Decimal>, surcharge: Decimal) -> SeatWithSurcharge {
        SeatWithSurcharge {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            label: "A1".to_string(),
            section_name: "Main".to_string(),
            price_override,
            price_surcharge: surcharge,
        }
    }

    #[test]
    fn test_base_plus_surcharge() {
        let seats = vec![
            seat(None, Decimal::ZERO),
            seat(None, Decimal::new(500, 2)), // VIP +5.00
        ];
        let price = price_booking(&seats, Decimal::new(1000, 2), Decimal::new(250, 2));
        assert_eq!(price.subtotal, Decimal::new(2500, 2));
        assert_eq!(price.total, Decimal::new(2750, 2));
    }

    #[test]
    fn test_override_replaces_base_and_surcharge() {
        let seats = vec![seat(Some(Decimal::new(9900, 2)), Decimal::new(500, 2))];
        let price = price_booking(&seats, Decimal::new(1000, 2), Decimal::ZERO);
        assert_eq!(price.subtotal, Decimal::new(9900, 2));
    }

    #[test]
    fn test_no_seats_still_charges_fee() {
        let price = price_booking(&[], Decimal::ONE, Decimal::new(250, 2));
        assert_eq!(price.subtotal, Decimal::ZERO);
        assert_eq!(price.total, Decimal::new(250, 2));
    }
}

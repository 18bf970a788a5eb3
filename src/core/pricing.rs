//! Seat-count normalization and reservation pricing.

/// Smallest party that can be booked.
pub const MIN_PARTY_SIZE: i32 = 1;
/// Largest party that can be booked.
pub const MAX_PARTY_SIZE: i32 = 10;

/// Rounds an odd seat count up to the next even number.
///
/// Tables only come in even sizes, so an odd party always takes (and pays for)
/// one extra seat.
#[must_use]
pub const fn normalize_seat_count(requested: i32) -> i32 {
    if requested % 2 == 0 {
        requested
    } else {
        requested + 1
    }
}

/// Number of seats the guest is charged for.
///
/// Booking a whole table earns a one-seat discount.
#[must_use]
pub const fn chargeable_seats(seats_count: i32, table_seats: i32) -> i32 {
    if seats_count == table_seats {
        table_seats - 1
    } else {
        seats_count
    }
}

/// Total price of booking `seats_count` seats at a table with `table_seats` seats.
#[must_use]
pub fn reservation_price(seats_count: i32, table_seats: i32, seat_price: i64) -> i64 {
    i64::from(chargeable_seats(seats_count, table_seats)) * seat_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rounds_odd_counts_up() {
        assert_eq!(normalize_seat_count(1), 2);
        assert_eq!(normalize_seat_count(3), 4);
        assert_eq!(normalize_seat_count(9), 10);
    }

    #[test]
    fn test_normalize_keeps_even_counts() {
        assert_eq!(normalize_seat_count(2), 2);
        assert_eq!(normalize_seat_count(10), 10);
    }

    #[test]
    fn test_whole_table_discount() {
        assert_eq!(reservation_price(4, 4, 10), 30);
        assert_eq!(reservation_price(10, 10, 10), 90);
    }

    #[test]
    fn test_partial_table_is_charged_per_seat() {
        assert_eq!(reservation_price(4, 6, 10), 40);
        assert_eq!(reservation_price(2, 8, 25), 50);
    }

    #[test]
    fn test_free_seats_cost_nothing() {
        assert_eq!(reservation_price(6, 8, 0), 0);
    }
}

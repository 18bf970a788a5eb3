//! Booking business logic - Reserves and cancels tables atomically.
//!
//! A booking resolves the best-fit table, prices it and inserts the reservation
//! inside a single database transaction. Before reading any capacity the transaction
//! takes a booking lock (see [`acquire_booking_lock`]) so that two concurrent bookings
//! can never both see the same free seats. The `DatabaseTransaction` guard rolls back
//! whenever it is dropped without a commit.

use crate::{
    core::{availability, pricing},
    entities::{Reservation, Table, TableSettings, reservation, table, table_settings},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    DbBackend, QueryOrder, QuerySelect, Select, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use tracing::{info, instrument, warn};

/// Checks the caller-side preconditions of a booking request.
///
/// `requested_seats` must lie in `[MIN_PARTY_SIZE, MAX_PARTY_SIZE]` and `date` must be
/// strictly after `today`.
///
/// # Errors
/// Returns [`Error::InvalidSeatCount`] or [`Error::DateNotInFuture`].
pub fn validate_booking_request(
    requested_seats: i32,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    if requested_seats < pricing::MIN_PARTY_SIZE || requested_seats > pricing::MAX_PARTY_SIZE {
        return Err(Error::InvalidSeatCount {
            seats: requested_seats,
            min: pricing::MIN_PARTY_SIZE,
            max: pricing::MAX_PARTY_SIZE,
        });
    }

    if date <= today {
        return Err(Error::DateNotInFuture { date });
    }

    Ok(())
}

/// Serializes the current transaction against every other booking transaction.
///
/// On `SQLite` the first statement is a no-op write, which takes the database write
/// lock up front; competing bookings wait on the busy timeout instead of reading a
/// stale aggregate. On `PostgreSQL` and `MySQL` every table row is locked with
/// `SELECT ... FOR UPDATE` until commit; under read-committed isolation the
/// aggregate read that follows sees every booking committed before the lock was granted.
///
/// # Errors
/// Returns a storage error if the lock statement fails.
pub async fn acquire_booking_lock<C>(txn: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    if txn.get_database_backend() == DbBackend::Sqlite {
        TableSettings::update_many()
            .col_expr(
                table_settings::Column::SeatPrice,
                Expr::col(table_settings::Column::SeatPrice).into(),
            )
            .exec(txn)
            .await?;
    } else {
        table_row_lock().all(txn).await?;
    }
    Ok(())
}

/// `SELECT ... FOR UPDATE` over every table row, in ID order.
fn table_row_lock() -> Select<Table> {
    Table::find()
        .order_by_asc(table::Column::Id)
        .lock_exclusive()
}

/// Books the best-fit table for a party on `date`.
///
/// Odd seat counts are rounded up to the next even number before allocation and
/// pricing. The returned model carries the generated reservation ID.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Authenticated user making the booking
/// * `requested_seats` - Party size as requested (validated by the caller)
/// * `date` - Day to book (validated by the caller)
///
/// # Errors
/// Returns [`Error::NoTablesAvailable`] if no table can seat the party,
/// [`Error::SettingsMissing`] if no seat price is stored, or a storage error if any
/// statement or the commit fails. Nothing is written in any of these cases.
#[instrument(skip(db))]
pub async fn book_table(
    db: &DatabaseConnection,
    user_id: i64,
    requested_seats: i32,
    date: NaiveDate,
) -> Result<reservation::Model> {
    let seats_count = pricing::normalize_seat_count(requested_seats);

    let txn = db.begin().await?;
    acquire_booking_lock(&txn).await?;

    let fit = availability::find_best_fit(&txn, date, seats_count)
        .await
        .inspect_err(|e| {
            if matches!(e, Error::NoTablesAvailable { .. }) {
                warn!("No table available for {seats_count} seats on {date}");
            }
        })?;

    let price = pricing::reservation_price(seats_count, fit.total_seats, fit.seat_price);

    let reservation = reservation::ActiveModel {
        user_id: Set(user_id),
        table_id: Set(fit.table_id),
        seats_count: Set(seats_count),
        price: Set(price),
        date: Set(date),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Reservation {} booked: table {}, {} seats on {}, price {}",
        reservation.id, reservation.table_id, reservation.seats_count, reservation.date, price
    );
    Ok(reservation)
}

/// Cancels a reservation by ID.
///
/// Ownership is not checked here; see [`cancel_user_reservation`].
///
/// # Errors
/// Returns [`Error::ReservationNotFound`] if no such reservation exists (nothing is
/// modified), or a storage error.
#[instrument(skip(db))]
pub async fn cancel_reservation(db: &DatabaseConnection, reservation_id: i64) -> Result<()> {
    cancel(db, reservation_id, None).await
}

/// Cancels a reservation only if it belongs to `user_id`.
///
/// Another user's reservation is reported as [`Error::ReservationNotFound`], the same
/// as a missing one.
///
/// # Errors
/// Returns [`Error::ReservationNotFound`] or a storage error.
#[instrument(skip(db))]
pub async fn cancel_user_reservation(
    db: &DatabaseConnection,
    user_id: i64,
    reservation_id: i64,
) -> Result<()> {
    cancel(db, reservation_id, Some(user_id)).await
}

async fn cancel(db: &DatabaseConnection, reservation_id: i64, owner: Option<i64>) -> Result<()> {
    let txn = db.begin().await?;

    let mut query = Reservation::find_by_id(reservation_id);
    if let Some(user_id) = owner {
        query = query.filter(reservation::Column::UserId.eq(user_id));
    }

    let reservation = query
        .one(&txn)
        .await?
        .ok_or(Error::ReservationNotFound { id: reservation_id })?;

    reservation.delete(&txn).await?;
    txn.commit().await?;

    info!("Reservation {reservation_id} canceled");
    Ok(())
}

/// Retrieves a reservation by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reservation_by_id(
    db: &DatabaseConnection,
    reservation_id: i64,
) -> Result<Option<reservation::Model>> {
    Reservation::find_by_id(reservation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all reservations for one date, ordered by table then ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reservations_for_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<reservation::Model>> {
    Reservation::find()
        .filter(reservation::Column::Date.eq(date))
        .order_by_asc(reservation::Column::TableId)
        .order_by_asc(reservation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

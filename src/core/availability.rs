//! Availability resolution - Finds the best-fit table for a party on a given day.
//!
//! Resolution is split into two steps so each rule can be checked on its own:
//! [`table_capacities`] aggregates booked seats per table for one date, and
//! [`select_best_fit`] picks the tightest table that still fits the party.
//! [`find_best_fit`] runs both on the caller's connection, which must be the
//! booking transaction so the read and the following insert see the same state.

use crate::{
    entities::{Reservation, Table, TableSettings, reservation, table},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, prelude::*};
use std::collections::HashMap;
use tracing::debug;

/// Seat usage of a single table on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCapacity {
    /// Table ID
    pub table_id: i32,
    /// Total seats at the table
    pub total_seats: i32,
    /// Seats already booked on the date
    pub reserved_seats: i32,
}

impl TableCapacity {
    /// Seats still free on the date.
    #[must_use]
    pub const fn available_seats(&self) -> i32 {
        self.total_seats - self.reserved_seats
    }
}

/// The table chosen for a booking together with the pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestFit {
    /// Chosen table
    pub table_id: i32,
    /// Total seats at the chosen table
    pub total_seats: i32,
    /// Seats free at the chosen table before this booking
    pub available_seats: i32,
    /// Current price per seat
    pub seat_price: i64,
}

/// Computes the booked and free seats of every table on `date`.
///
/// Tables without reservations on that date report zero reserved seats.
/// Results are ordered by table ID.
///
/// # Errors
/// Returns an error if either query fails.
pub async fn table_capacities<C>(db: &C, date: NaiveDate) -> Result<Vec<TableCapacity>>
where
    C: ConnectionTrait,
{
    let tables = Table::find()
        .order_by_asc(table::Column::Id)
        .all(db)
        .await?;

    let reserved: HashMap<i32, i64> = Reservation::find()
        .select_only()
        .column(reservation::Column::TableId)
        .column_as(reservation::Column::SeatsCount.sum(), "reserved_seats")
        .filter(reservation::Column::Date.eq(date))
        .group_by(reservation::Column::TableId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    Ok(tables
        .into_iter()
        .map(|t| {
            // SUM widens to BIGINT on PostgreSQL; an out-of-range sum reads as full.
            let booked = reserved.get(&t.id).copied().unwrap_or(0);
            TableCapacity {
                table_id: t.id,
                total_seats: t.seats_count,
                reserved_seats: i32::try_from(booked).unwrap_or(i32::MAX),
            }
        })
        .collect())
}

/// Picks the table with the least free capacity that still seats the party.
///
/// Ties on free capacity go to the lowest table ID, so the choice is deterministic.
/// Returns `None` when no table has `seats_needed` free seats.
#[must_use]
pub fn select_best_fit(capacities: &[TableCapacity], seats_needed: i32) -> Option<TableCapacity> {
    capacities
        .iter()
        .filter(|c| c.available_seats() >= seats_needed)
        .min_by_key(|c| (c.available_seats(), c.table_id))
        .copied()
}

/// Reads the single seat price row.
///
/// # Errors
/// Returns [`Error::SettingsMissing`] if the row was never seeded.
pub async fn get_seat_price<C>(db: &C) -> Result<i64>
where
    C: ConnectionTrait,
{
    TableSettings::find()
        .one(db)
        .await?
        .map(|settings| settings.seat_price)
        .ok_or(Error::SettingsMissing)
}

/// Finds the best-fit table for `seats_needed` seats on `date`.
///
/// # Errors
/// Returns [`Error::NoTablesAvailable`] if no table has enough free seats,
/// [`Error::SettingsMissing`] if no seat price is stored, or a storage error.
pub async fn find_best_fit<C>(db: &C, date: NaiveDate, seats_needed: i32) -> Result<BestFit>
where
    C: ConnectionTrait,
{
    let capacities = table_capacities(db, date).await?;

    let Some(chosen) = select_best_fit(&capacities, seats_needed) else {
        debug!(
            "No table among {} has {seats_needed} free seats on {date}",
            capacities.len()
        );
        return Err(Error::NoTablesAvailable {
            seats: seats_needed,
            date,
        });
    };

    let seat_price = get_seat_price(db).await?;
    debug!(
        "Best fit for {seats_needed} seats on {date}: table {} ({} of {} free)",
        chosen.table_id,
        chosen.available_seats(),
        chosen.total_seats
    );

    Ok(BestFit {
        table_id: chosen.table_id,
        total_seats: chosen.total_seats,
        available_seats: chosen.available_seats(),
        seat_price,
    })
}

//! Shared test utilities for the booking service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::restaurant::{RestaurantConfig, TableConfig},
    core::{seed, user},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection, Set};
use std::path::Path;

/// Password used for every test user.
pub const TEST_PASSWORD: &str = "password123";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database in `dir` with a pool of `max_connections`.
///
/// In-memory databases are limited to one pooled connection, so transactions there
/// never overlap. Use this when a test needs real concurrent transactions.
pub async fn setup_pooled_test_db(dir: &Path, max_connections: u32) -> Result<DatabaseConnection> {
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.join("table_booker_test.sqlite").display()
    );
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .min_connections(max_connections)
        .sqlx_logging(false);

    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Seeds tables with the given sizes (IDs 1, 2, ... in order) and a seat price.
pub async fn seed_test_restaurant(
    db: &DatabaseConnection,
    table_sizes: &[i32],
    seat_price: i64,
) -> Result<()> {
    let config = RestaurantConfig {
        seat_price,
        tables: table_sizes
            .iter()
            .map(|&seats_count| TableConfig { seats_count })
            .collect(),
    };
    seed::seed_restaurant(db, &config).await?;
    Ok(())
}

/// Registers a user with [`TEST_PASSWORD`].
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    user::register_user(db, username, TEST_PASSWORD).await
}

/// Inserts a reservation row directly, bypassing allocation and pricing.
/// Use this to set up booked capacity for a date.
pub async fn insert_test_reservation(
    db: &DatabaseConnection,
    user_id: i64,
    table_id: i32,
    seats_count: i32,
    date: NaiveDate,
) -> Result<entities::reservation::Model> {
    entities::reservation::ActiveModel {
        user_id: Set(user_id),
        table_id: Set(table_id),
        seats_count: Set(seats_count),
        price: Set(0),
        date: Set(date),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A fixed date far enough ahead to always be in the future.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 6, 15).unwrap_or_default()
}

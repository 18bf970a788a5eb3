//! Database configuration module for the booking service.
//!
//! This module handles database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. `SQLite` is the default backend;
//! `PostgreSQL` is selected by pointing `DATABASE_URL` at a `postgres://` URL.

use crate::entities::{Reservation, Table, TableSettings, User, reservation};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the `SQLite` database file, created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/table_booker.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection pool for the given database URL.
///
/// For file-backed `SQLite` URLs the parent directory is created first.
///
/// # Errors
/// Returns an error if the URL is invalid or the database cannot be reached.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .and_then(|path| Path::new(path).parent())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Returns the file path of a `sqlite://` URL, or `None` for in-memory and non-`SQLite` URLs.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty() && path != ":memory:").then_some(path)
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Tables are created parents first so foreign keys from `reservations` resolve.
/// The `(date, table_id)` index backs the per-day capacity aggregation.
///
/// # Errors
/// Returns an error if any DDL statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    let mut table_table = schema.create_table_from_entity(Table);
    let mut settings_table = schema.create_table_from_entity(TableSettings);
    let mut reservation_table = schema.create_table_from_entity(Reservation);

    db.execute(builder.build(user_table.if_not_exists())).await?;
    db.execute(builder.build(table_table.if_not_exists())).await?;
    db.execute(builder.build(settings_table.if_not_exists()))
        .await?;
    db.execute(builder.build(reservation_table.if_not_exists()))
        .await?;

    let date_index = Index::create()
        .if_not_exists()
        .name("idx_reservations_date_table")
        .table(Reservation)
        .col(reservation::Column::Date)
        .col(reservation::Column::TableId)
        .to_owned();
    db.execute(builder.build(&date_index)).await?;

    info!("Database tables ensured.");
    Ok(())
}

//! Startup seeding of the restaurant layout.
//!
//! Tables and the seat price are written once, the first time the service starts
//! against an empty database. Later starts leave existing rows untouched.

use crate::{
    config::restaurant::RestaurantConfig,
    entities::{Table, table, table_settings},
    errors::Result,
};
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Tables and settings were inserted
    Seeded {
        /// Number of tables inserted
        tables: usize,
    },
    /// Tables already existed; nothing was written
    AlreadySeeded,
}

/// Seeds tables and the seat price if the database has no tables yet.
///
/// All rows are inserted in one transaction, so a failed seed leaves the database
/// empty and the next start retries it.
///
/// # Errors
/// Returns an error if the layout is invalid or any insert fails.
#[instrument(skip(db, config))]
pub async fn seed_restaurant(
    db: &DatabaseConnection,
    config: &RestaurantConfig,
) -> Result<SeedOutcome> {
    config.validate()?;

    let existing = Table::find().count(db).await?;
    if existing > 0 {
        info!("{existing} tables already present, skipping seed.");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let txn = db.begin().await?;

    for table_config in &config.tables {
        table::ActiveModel {
            seats_count: Set(table_config.seats_count),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    table_settings::ActiveModel {
        seat_price: Set(config.seat_price),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Seeded {} tables with seat price {}.",
        config.tables.len(),
        config.seat_price
    );
    Ok(SeedOutcome::Seeded {
        tables: config.tables.len(),
    })
}

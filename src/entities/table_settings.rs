//! Table settings entity - Restaurant-wide pricing.
//! Holds a single row with the price charged per booked seat.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Table settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "table_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Price charged for each seat of a reservation
    pub seat_price: i64,
}

/// `TableSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

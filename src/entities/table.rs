//! Table entity - A physical dining table and its seat capacity.
//!
//! Tables are seeded once at startup and never modified afterwards. Every
//! reservation references exactly one table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dining table database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    /// Unique identifier for the table
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Total number of seats at the table
    pub seats_count: i32,
}

/// Defines relationships between Table and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One table has many reservations
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

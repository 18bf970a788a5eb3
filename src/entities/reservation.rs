//! Reservation entity - A confirmed booking of seats at one table for one day.
//!
//! Each reservation has a `user_id`, `table_id`, `seats_count`, the computed `price`
//! and the reserved `date`. Reservations are created by the booking manager and
//! removed only by cancellation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Unique identifier for the reservation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who made the reservation
    pub user_id: i64,
    /// ID of the reserved table
    pub table_id: i32,
    /// Number of seats booked (always even)
    pub seats_count: i32,
    /// Total price charged for the reservation
    pub price: i64,
    /// Day the table is reserved for
    pub date: Date,
}

/// Defines relationships between Reservation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reservation occupies seats at one table
    #[sea_orm(
        belongs_to = "super::table::Entity",
        from = "Column::TableId",
        to = "super::table::Column::Id"
    )]
    Table,
    /// Each reservation belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Table.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

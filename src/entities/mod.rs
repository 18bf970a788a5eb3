//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod reservation;
pub mod table;
pub mod table_settings;
pub mod user;

// Re-export specific types to avoid conflicts
pub use reservation::{
    Column as ReservationColumn, Entity as Reservation, Model as ReservationModel,
};
pub use table::{Column as TableColumn, Entity as Table, Model as TableModel};
pub use table_settings::{
    Column as TableSettingsColumn, Entity as TableSettings, Model as TableSettingsModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};

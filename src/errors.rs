//! Unified error type for the booking service.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures from
//! `SeaORM` are kept intact in [`Error::Storage`] so callers can tell them apart from
//! the recoverable, user-facing variants.

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by the booking service.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is wrong
        message: String,
    },

    /// Any failure reported by the storage engine, including failed commits
    #[error("Storage failure: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// No table has enough free seats on the requested date
    #[error("no tables are available")]
    NoTablesAvailable {
        /// Normalized seat count that was requested
        seats: i32,
        /// Requested reservation date
        date: NaiveDate,
    },

    /// The reservation does not exist (or is not visible to the caller)
    #[error("reservation not found")]
    ReservationNotFound {
        /// Reservation ID that was looked up
        id: i64,
    },

    /// The seed step never wrote the seat price row
    #[error("Table settings are missing: seat price is not configured")]
    SettingsMissing,

    /// Seat count outside the bookable range
    #[error("Invalid seat count {seats}: must be between {min} and {max}")]
    InvalidSeatCount {
        /// Requested seat count
        seats: i32,
        /// Smallest bookable party
        min: i32,
        /// Largest bookable party
        max: i32,
    },

    /// Reservation date is not strictly in the future
    #[error("Invalid date, should be in the future")]
    DateNotInFuture {
        /// Requested reservation date
        date: NaiveDate,
    },

    /// Request payload failed validation
    #[error("{message}")]
    Validation {
        /// Human-readable validation failure
        message: String,
    },

    /// Registration with a username that is already in use
    #[error("username already exists")]
    UsernameTaken {
        /// Username that was requested
        username: String,
    },

    /// Unknown username or wrong password
    #[error("username or password is incorrect")]
    InvalidCredentials,

    /// Missing, malformed or expired access token
    #[error("{message}")]
    Unauthorized {
        /// Why the request was rejected
        message: String,
    },

    /// Password hashing or hash parsing failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher error
        message: String,
    },

    /// Token encoding failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// I/O failure (config files, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Whether the error came from the storage engine rather than from a
    /// business rule.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::SettingsMissing)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

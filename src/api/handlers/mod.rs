//! HTTP handlers, one module per resource.

/// Liveness probe
pub mod health;
/// Booking and cancellation endpoints
pub mod reservations;
/// Registration and login endpoints
pub mod users;

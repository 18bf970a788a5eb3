//! Core business logic - framework-agnostic booking, availability and user operations.
//!
//! Every operation takes the database handle explicitly; nothing here holds
//! global state or knows about HTTP.

/// Per-date table capacity and best-fit selection
pub mod availability;
/// Atomic booking and cancellation
pub mod booking;
/// Seat-count normalization and pricing rules
pub mod pricing;
/// One-time seeding of tables and seat price
pub mod seed;
/// User registration and login
pub mod user;

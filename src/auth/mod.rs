//! Authentication helpers - password hashing and access tokens.
//!
//! These are used by the user operations and the HTTP layer; the booking core
//! only ever sees an already-resolved user ID.

/// Argon2id password hashing and verification
pub mod password;
/// HS256 access token issuance and verification
pub mod token;

pub use token::{Claims, IssuedToken, TokenManager};

//! Argon2id password hashing and verification.

use crate::errors::{Error, Result};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Hashes a plaintext password using Argon2id with a random salt.
///
/// # Errors
/// Returns [`Error::PasswordHash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash {
            message: format!("Password hashing failed: {e}"),
        })
}

/// Verifies a plaintext password against a stored Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
///
/// # Errors
/// Returns [`Error::PasswordHash`] if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::PasswordHash {
        message: format!("Invalid password hash format: {e}"),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHash {
            message: format!("Password verification failed: {e}"),
        }),
    }
}

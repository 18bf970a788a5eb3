//! Access token creation and validation.
//!
//! Tokens are HS256 JWTs carrying the user ID in `sub`. There is no refresh
//! flow; clients log in again once a token expires.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest signing secret accepted.
pub const MIN_SECRET_LENGTH: usize = 32;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID
    pub sub: i64,
    /// Username at the time of issuance
    pub username: String,
    /// Unique token ID
    pub jti: Uuid,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.sub
    }
}

/// A freshly signed token and when it stops being accepted.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Expiration time
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Creates a token manager from a signing secret.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the secret is shorter than [`MIN_SECRET_LENGTH`].
    pub fn new(secret: &str) -> Result<Self> {
        if secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(Error::Config {
                message: format!(
                    "valid secret key size must be at least {MIN_SECRET_LENGTH} characters"
                ),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issues a token for `user_id` valid for `ttl`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `now + ttl` is not a representable time, or
    /// [`Error::Token`] if encoding fails.
    pub fn issue(&self, user_id: i64, username: &str, ttl: chrono::Duration) -> Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| Error::Config {
            message: format!("token lifetime {ttl} is out of range"),
        })?;

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Decodes and validates a token.
    ///
    /// # Errors
    /// Returns [`Error::Unauthorized`] if the signature, algorithm or expiry is invalid.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let message = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature",
                    _ => "Invalid or expired token",
                };
                Error::Unauthorized {
                    message: message.to_string(),
                }
            })
    }
}

//! `AuthUser` extractor - pulls the bearer token from the Authorization header and validates it.

use crate::{api::AppState, errors::Error};
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

/// Authorization scheme accepted in the `Authorization` header.
pub const BEARER: &str = "Bearer";

/// The authenticated caller, available to handlers behind a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// ID of the user the token was issued to
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Unauthorized {
                message: "Authorization header is required".to_string(),
            })?;

        let token = parse_bearer(header).ok_or_else(|| Error::Unauthorized {
            message: "Invalid Authorization header format".to_string(),
        })?;

        let claims = state.tokens.verify(token)?;
        Ok(Self {
            user_id: claims.user_id(),
        })
    }
}

/// Extracts the token from `Bearer <token>`; any other shape is rejected.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER), Some(token), None) => Some(token),
        _ => None,
    }
}

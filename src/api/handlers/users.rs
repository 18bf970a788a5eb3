//! Registration and login endpoints.

use crate::{
    api::AppState,
    core::user,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shortest accepted username.
pub const MIN_USERNAME_LENGTH: usize = 5;
/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Body of `POST /users` and `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
}

impl CredentialsRequest {
    fn validate(&self) -> Result<()> {
        if self.username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(Error::Validation {
                message: format!("username must be at least {MIN_USERNAME_LENGTH} characters"),
            });
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation {
                message: format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            });
        }
        Ok(())
    }
}

/// Public view of a registered user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: i64,
    /// Login name
    pub username: String,
}

/// Public view of a logged-in user.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    /// User ID
    pub id: i64,
    /// Login name
    pub username: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for authenticated endpoints
    pub access_token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
    /// The logged-in user
    pub user: LoginUser,
}

/// `POST /users` - registers a new account.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(request) = payload?;
    request.validate()?;

    let created = user::register_user(&state.db, &request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: created.id,
            username: created.username,
        }),
    ))
}

/// `POST /users/login` - exchanges credentials for an access token.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    let found = user::authenticate(&state.db, &request.username, &request.password).await?;
    let issued = state
        .tokens
        .issue(found.id, &found.username, state.token_ttl)?;

    Ok(Json(LoginResponse {
        access_token: issued.token,
        expires_at: issued.expires_at,
        user: LoginUser {
            id: found.id,
            username: found.username,
            created_at: found.created_at,
        },
    }))
}

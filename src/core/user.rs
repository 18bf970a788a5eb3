//! User business logic - Registration, login and lookups.
//!
//! Passwords are stored only as Argon2id hashes. Username uniqueness is enforced
//! by the database's unique index; a violation is reported as
//! [`Error::UsernameTaken`].

use crate::{
    auth::password,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*};
use tracing::{info, instrument, warn};

/// Finds a user by username.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Registers a new user with a hashed password.
///
/// Input length rules are enforced by the HTTP layer.
///
/// # Errors
/// Returns [`Error::UsernameTaken`] if the username is in use, or a hashing or
/// storage error.
#[instrument(skip(db, password))]
pub async fn register_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let password_hash = password::hash_password(password)?;

    let new_user = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_user.insert(db).await {
        Ok(created) => {
            info!("Registered user {} ({})", created.username, created.id);
            Ok(created)
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Username {username} is already taken");
            Err(Error::UsernameTaken {
                username: username.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks a username/password pair and returns the matching user.
///
/// Unknown usernames and wrong passwords produce the same error.
///
/// # Errors
/// Returns [`Error::InvalidCredentials`] on mismatch, or a storage error.
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let Some(found) = get_user_by_username(db, username).await? else {
        warn!("Login attempt for unknown user {username}");
        return Err(Error::InvalidCredentials);
    };

    if !password::verify_password(password, &found.password_hash)? {
        warn!("Wrong password for user {username}");
        return Err(Error::InvalidCredentials);
    }

    Ok(found)
}

//! Server configuration module for loading runtime settings from environment variables.
//!
//! Values are read from the process environment (populated from `.env` by `dotenvy`
//! in `main`). Everything except `SECRET_KEY` has a default.

use crate::config::database::get_database_url;
use crate::errors::{Error, Result};
use std::time::Duration;

/// Default socket address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
/// Default lifetime of issued access tokens.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// Default time allowed for in-flight requests to finish on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
/// Default path of the restaurant layout file.
pub const DEFAULT_RESTAURANT_CONFIG: &str = "restaurant.toml";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:8080`
    pub bind_address: String,
    /// Database URL passed to `SeaORM`
    pub database_url: String,
    /// HMAC secret used to sign access tokens
    pub secret_key: String,
    /// Lifetime of issued access tokens
    pub token_ttl: chrono::Duration,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout: Duration,
    /// Path of the restaurant layout file
    pub restaurant_config_path: String,
}

/// Loads the server configuration from the environment.
///
/// # Errors
/// Returns an error if `SECRET_KEY` is not set, or a numeric variable cannot be parsed.
pub fn load_server_config() -> Result<ServerConfig> {
    let secret_key = std::env::var("SECRET_KEY")?;
    let token_ttl_minutes = parse_env_or("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
    let shutdown_timeout_secs =
        parse_env_or("SHUTDOWN_TIMEOUT_SECS", DEFAULT_SHUTDOWN_TIMEOUT_SECS)?;

    Ok(ServerConfig {
        bind_address: std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        database_url: get_database_url(),
        secret_key,
        token_ttl: token_ttl(token_ttl_minutes)?,
        shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
        restaurant_config_path: std::env::var("RESTAURANT_CONFIG")
            .unwrap_or_else(|_| DEFAULT_RESTAURANT_CONFIG.to_string()),
    })
}

/// Converts a positive number of minutes into a token lifetime.
fn token_ttl(minutes: i64) -> Result<chrono::Duration> {
    if minutes <= 0 {
        return Err(Error::Config {
            message: format!("TOKEN_TTL_MINUTES must be positive, got {minutes}"),
        });
    }
    chrono::Duration::try_minutes(minutes).ok_or_else(|| Error::Config {
        message: format!("TOKEN_TTL_MINUTES is out of range: {minutes}"),
    })
}

fn parse_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name).map_or(Ok(default), |raw| parse_value(name, &raw))
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("{name} has invalid value '{raw}': {e}"),
    })
}

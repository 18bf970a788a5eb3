/// Database configuration and connection management
pub mod database;

/// Restaurant layout loading from restaurant.toml
pub mod restaurant;

/// Server settings from environment variables
pub mod server;

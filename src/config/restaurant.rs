//! Restaurant layout loading from restaurant.toml
//!
//! This module provides functionality to load the table layout and seat price
//! from a TOML configuration file. The layout is used to seed the database on
//! first run. When no file exists the built-in default layout is used.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Seat price applied when the configuration does not provide one.
pub const DEFAULT_SEAT_PRICE: i64 = 10;

/// Table sizes seeded when no layout file is present.
pub const DEFAULT_TABLE_SIZES: [i32; 10] = [4, 4, 4, 4, 6, 6, 6, 8, 8, 10];

/// Configuration structure representing the entire restaurant.toml file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RestaurantConfig {
    /// Price charged per booked seat
    #[serde(default = "default_seat_price")]
    pub seat_price: i64,
    /// Tables to seed, in id order
    pub tables: Vec<TableConfig>,
}

/// Configuration for a single table
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of seats at the table (positive and even)
    pub seats_count: i32,
}

const fn default_seat_price() -> i64 {
    DEFAULT_SEAT_PRICE
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            seat_price: DEFAULT_SEAT_PRICE,
            tables: DEFAULT_TABLE_SIZES
                .iter()
                .map(|&seats_count| TableConfig { seats_count })
                .collect(),
        }
    }
}

impl RestaurantConfig {
    /// Checks that the layout can be seeded.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if there are no tables, a table has a non-positive
    /// or odd seat count, or the seat price is negative.
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            return Err(Error::Config {
                message: "restaurant must have at least one table".to_string(),
            });
        }

        if self.seat_price < 0 {
            return Err(Error::Config {
                message: format!("seat_price must not be negative, got {}", self.seat_price),
            });
        }

        // Odd parties are rounded up to an even seat count, so odd tables could never fill.
        if let Some(table) = self
            .tables
            .iter()
            .find(|t| t.seats_count <= 0 || t.seats_count % 2 != 0)
        {
            return Err(Error::Config {
                message: format!(
                    "table seats_count must be a positive even number, got {}",
                    table.seats_count
                ),
            });
        }

        Ok(())
    }
}

/// Parses and validates a restaurant layout from a TOML string.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid, required fields are missing,
/// or the layout fails [`RestaurantConfig::validate`].
pub fn parse_config(contents: &str) -> Result<RestaurantConfig> {
    let config: RestaurantConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse restaurant config: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the restaurant layout from a TOML file
///
/// # Arguments
/// * `path` - Path to the restaurant.toml file
///
/// # Returns
/// * `Ok(RestaurantConfig)` - Parsed layout, or the default layout if the file does not exist
/// * `Err(Error)` - The file exists but could not be read or parsed
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RestaurantConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(
            "Restaurant config {} not found, using the default layout",
            path.display()
        );
        return Ok(RestaurantConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read restaurant config {}: {e}", path.display()),
    })?;
    let config = parse_config(&contents)?;
    info!(
        "Loaded restaurant layout with {} tables from {}",
        config.tables.len(),
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_restaurant_config() {
        let toml_str = r"
            seat_price = 15

            [[tables]]
            seats_count = 2

            [[tables]]
            seats_count = 6
        ";

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.seat_price, 15);
        assert_eq!(config.tables.len(), 2);
        assert_eq!(config.tables[0].seats_count, 2);
        assert_eq!(config.tables[1].seats_count, 6);
    }

    #[test]
    fn test_seat_price_defaults_when_omitted() {
        let config = parse_config("[[tables]]\nseats_count = 4\n").unwrap();
        assert_eq!(config.seat_price, DEFAULT_SEAT_PRICE);
    }

    #[test]
    fn test_default_layout() {
        let config = RestaurantConfig::default();
        assert_eq!(config.seat_price, 10);
        let sizes: Vec<i32> = config.tables.iter().map(|t| t.seats_count).collect();
        assert_eq!(sizes, vec![4, 4, 4, 4, 6, 6, 6, 8, 8, 10]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_odd_table() {
        let result = parse_config("[[tables]]\nseats_count = 5\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_empty_layout() {
        let result = parse_config("seat_price = 10\ntables = []\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = parse_config("seat_price = -1\n[[tables]]\nseats_count = 4\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_default() {
        let config = load_config("definitely/not/here/restaurant.toml").unwrap();
        assert_eq!(config, RestaurantConfig::default());
    }
}

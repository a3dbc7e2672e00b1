//! Seed catalog loading from config.toml
//!
//! This module loads the initial product catalog from a TOML configuration
//! file. The products defined in config.toml are used to seed the database
//! on first run or when products are missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of product definitions to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Name of the product
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Initial stock quantity
    pub stock: i32,
    /// Optional scan code
    pub barcode: Option<String>,
    /// Optional free-text description
    pub description: Option<String>,
}

/// Loads the seed catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed catalog from the default location (./config.toml)
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}

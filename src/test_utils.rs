//! Shared test utilities for Tillpoint.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{product, shift},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a catalog product with the given price and starting stock.
/// Barcode and description are left empty.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i32,
) -> Result<entities::product::Model> {
    product::create_product(db, name, price, stock, None, None).await
}

/// Opens a shift for the operator with a $100.00 drawer float.
pub async fn start_test_shift(
    db: &DatabaseConnection,
    operator_id: &str,
) -> Result<entities::shift::Model> {
    shift::start_shift(db, operator_id, 100.0).await
}

/// Builds a detached product model for pure cart tests that never touch
/// the database.
#[must_use]
pub fn sample_product(id: i64, name: &str, price: f64, stock: i32) -> entities::product::Model {
    let now = chrono::Utc::now().naive_utc();
    entities::product::Model {
        id,
        name: name.to_string(),
        price,
        barcode: None,
        description: None,
        stock_quantity: stock,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

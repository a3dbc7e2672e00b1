//! Product business logic - catalog management.
//!
//! Creation, update, lookup, and soft deletion of catalog products, plus
//! seeding from config.toml. Stock changes do not happen here: they go
//! through [`crate::core::inventory`] so every movement leaves a ledger
//! entry.

use crate::{
    config::catalog::CatalogConfig,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all active (non-deleted) products, ordered alphabetically by name.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by name, returning None if not found or deleted.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by scan code, returning None if not found or deleted.
/// This is the lookup the register uses when a barcode is scanned.
pub async fn get_product_by_barcode(
    db: &DatabaseConnection,
    barcode: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Barcode.eq(barcode))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new catalog product, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The initial stock is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock_quantity: i32,
    barcode: Option<String>,
    description: Option<String>,
) -> Result<product::Model> {
    validate_name_and_price(name, price)?;
    if stock_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: stock_quantity,
        });
    }

    let now = chrono::Utc::now().naive_utc();

    let new_product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        barcode: Set(barcode),
        description: Set(description),
        stock_quantity: Set(stock_quantity),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_product.insert(db).await.map_err(Into::into)
}

/// Updates an existing product's catalog fields and refreshes `updated_at`.
///
/// Stock is deliberately not updatable here; restock and adjustment are the
/// audited paths for that.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: &str,
    price: f64,
    barcode: Option<String>,
    description: Option<String>,
) -> Result<product::Model> {
    validate_name_and_price(name, price)?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    if existing.is_deleted {
        return Err(Error::ProductNotFound { id: product_id });
    }

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.price = Set(price);
    active.barcode = Set(barcode);
    active.description = Set(description);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Soft-deletes a product: it disappears from the catalog but its sale and
/// ledger history is preserved.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let mut active: product::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Seeds the catalog from config.toml, inserting only products whose names
/// are not already present. Returns the number of products inserted.
pub async fn seed_catalog(db: &DatabaseConnection, config: &CatalogConfig) -> Result<usize> {
    let mut inserted = 0;

    for entry in &config.products {
        if get_product_by_name(db, entry.name.trim()).await?.is_some() {
            continue;
        }
        create_product(
            db,
            &entry.name,
            entry.price,
            entry.stock,
            entry.barcode.clone(),
            entry.description.clone(),
        )
        .await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "catalog seeded from config");
    }
    Ok(inserted)
}

fn validate_name_and_price(name: &str, price: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

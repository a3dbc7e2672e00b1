//! Database configuration module for Tillpoint.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions. One constraint cannot be expressed on an entity: the
//! "at most one active shift per operator" rule, which is installed here as a
//! partial unique index after the tables exist.

use crate::entities::{InventoryTransaction, Product, Sale, SaleItem, Shift, SystemState};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Partial unique index backing the single-active-shift invariant. A client
/// pre-check alone is racy; with this index a second concurrent insert is
/// rejected by the store itself.
const ACTIVE_SHIFT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_shifts_one_active_per_operator \
     ON shifts (operator_id) WHERE status = 'active'";

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/tillpoint.sqlite?mode=rwc".to_string()))
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all database tables and the partial unique index on shifts.
///
/// Table creation is generated from the `DeriveEntityModel` definitions, so
/// no hand-written DDL is needed for columns or unique column constraints
/// (receipt numbers, state keys).
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let product_table = schema.create_table_from_entity(Product);
    let shift_table = schema.create_table_from_entity(Shift);
    let sale_table = schema.create_table_from_entity(Sale);
    let sale_item_table = schema.create_table_from_entity(SaleItem);
    let inventory_table = schema.create_table_from_entity(InventoryTransaction);
    let system_state_table = schema.create_table_from_entity(SystemState);

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&shift_table)).await?;
    db.execute(builder.build(&sale_table)).await?;
    db.execute(builder.build(&sale_item_table)).await?;
    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&system_state_table)).await?;

    db.execute_unprepared(ACTIVE_SHIFT_INDEX).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        inventory_transaction::Model as InventoryTransactionModel,
        product::Model as ProductModel, sale::Model as SaleModel,
        sale_item::Model as SaleItemModel, shift, shift::Model as ShiftModel,
        system_state::Model as SystemStateModel,
    };
    use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<ShiftModel> = Shift::find().limit(1).all(&db).await?;
        let _: Vec<SaleModel> = Sale::find().limit(1).all(&db).await?;
        let _: Vec<SaleItemModel> = SaleItem::find().limit(1).all(&db).await?;
        let _: Vec<InventoryTransactionModel> =
            InventoryTransaction::find().limit(1).all(&db).await?;
        let _: Vec<SystemStateModel> = SystemState::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_active_shift_index_rejects_duplicate() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let open_shift = |cash: f64| shift::ActiveModel {
            operator_id: Set("op-1".to_string()),
            starting_cash: Set(cash),
            status: Set(shift::STATUS_ACTIVE.to_string()),
            start_time: Set(chrono::Utc::now()),
            end_time: Set(None),
            closing_cash: Set(None),
            expected_cash: Set(None),
            ..Default::default()
        };

        open_shift(50.0).insert(&db).await?;

        // Bypassing the application-level existence check must still fail.
        let second = open_shift(75.0).insert(&db).await;
        assert!(second.is_err());

        // A different operator is unaffected.
        let other = shift::ActiveModel {
            operator_id: Set("op-2".to_string()),
            starting_cash: Set(20.0),
            status: Set(shift::STATUS_ACTIVE.to_string()),
            start_time: Set(chrono::Utc::now()),
            end_time: Set(None),
            closing_cash: Set(None),
            expected_cash: Set(None),
            ..Default::default()
        };
        other.insert(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_closed_shifts_do_not_collide() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        for cash in [10.0, 20.0] {
            let closed = shift::ActiveModel {
                operator_id: Set("op-1".to_string()),
                starting_cash: Set(cash),
                status: Set(shift::STATUS_CLOSED.to_string()),
                start_time: Set(chrono::Utc::now()),
                end_time: Set(Some(chrono::Utc::now())),
                closing_cash: Set(Some(cash)),
                expected_cash: Set(Some(cash)),
                ..Default::default()
            };
            closed.insert(&db).await?;
        }

        Ok(())
    }
}

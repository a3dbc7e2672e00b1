//! Inventory business logic - stock counters and the audit ledger.
//!
//! Every stock movement pairs an append-only ledger entry with an atomic
//! update of the product's live counter, both inside one database
//! transaction. Counter updates are expressed as deltas at the store
//! (`stock_quantity = stock_quantity - n`), never as read-modify-write from
//! the client, so concurrent movements cannot silently lose an update.
//! Decrements additionally carry a `stock_quantity >= n` guard, which keeps
//! the counter non-negative without a pre-read.

use crate::{
    entities::{Product, inventory_transaction, product},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Direction of a manual stock adjustment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdjustmentDirection {
    /// Stock goes up by the given quantity
    Increase,
    /// Stock goes down by the given quantity
    Decrease,
}

/// Appends one entry to the inventory ledger.
///
/// `quantity_delta` is signed: negative for sales, positive for restocks,
/// either for adjustments. The caller is responsible for applying the
/// matching counter update in the same transaction.
pub async fn record_transaction<C>(
    db: &C,
    product_id: i64,
    quantity_delta: i32,
    transaction_type: &str,
    reference_id: Option<i64>,
    operator_id: &str,
    notes: Option<String>,
) -> Result<inventory_transaction::Model>
where
    C: ConnectionTrait,
{
    let entry = inventory_transaction::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(quantity_delta),
        transaction_type: Set(transaction_type.to_string()),
        reference_id: Set(reference_id),
        operator_id: Set(operator_id.to_string()),
        notes: Set(notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Atomically subtracts `quantity` from a product's stock counter.
///
/// The update only matches rows where enough stock remains, so two
/// concurrent decrements can never drive the counter negative or overwrite
/// each other. Zero affected rows means the product is missing or depleted.
///
/// # Errors
/// - [`Error::InvalidQuantity`] if `quantity < 1`
/// - [`Error::ProductNotFound`] if no such product exists
/// - [`Error::InsufficientStock`] if fewer than `quantity` units remain
pub async fn decrement_stock<C>(db: &C, product_id: i64, quantity: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let result = Product::update_many()
        .col_expr(
            product::Column::StockQuantity,
            Expr::col(product::Column::StockQuantity).sub(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::StockQuantity.gte(quantity))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        let product = Product::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or(Error::ProductNotFound { id: product_id })?;
        return Err(Error::InsufficientStock {
            name: product.name,
            requested: quantity,
            available: product.stock_quantity,
        });
    }

    Ok(())
}

/// Atomically adds `quantity` to a product's stock counter.
///
/// # Errors
/// - [`Error::InvalidQuantity`] if `quantity < 1`
/// - [`Error::ProductNotFound`] if no such product exists
pub async fn increment_stock<C>(db: &C, product_id: i64, quantity: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let result = Product::update_many()
        .col_expr(
            product::Column::StockQuantity,
            Expr::col(product::Column::StockQuantity).add(quantity),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }

    Ok(())
}

/// Records a delivery: one `"restock"` ledger entry plus the matching
/// counter increment, committed together.
///
/// # Errors
/// Returns an error if the quantity is invalid, the product is missing or
/// deleted, or the database fails; on any error nothing is written.
pub async fn restock(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: i32,
    operator_id: &str,
    notes: Option<String>,
) -> Result<product::Model> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let product = find_live_product(&txn, product_id).await?;

    record_transaction(
        &txn,
        product_id,
        quantity,
        inventory_transaction::TYPE_RESTOCK,
        None,
        operator_id,
        notes,
    )
    .await?;
    increment_stock(&txn, product_id, quantity).await?;

    let updated = find_live_product(&txn, product_id).await?;
    txn.commit().await?;

    info!(
        product = %product.name,
        quantity,
        new_stock = updated.stock_quantity,
        "restock recorded"
    );
    Ok(updated)
}

/// Records a manual stock correction in either direction.
///
/// A decrease that would take the counter below zero is rejected with
/// [`Error::InsufficientStock`] and leaves no trace: the ledger entry
/// written earlier in the transaction rolls back with it.
pub async fn adjust_stock(
    db: &DatabaseConnection,
    product_id: i64,
    direction: AdjustmentDirection,
    quantity: i32,
    operator_id: &str,
    notes: Option<String>,
) -> Result<product::Model> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let delta = match direction {
        AdjustmentDirection::Increase => quantity,
        AdjustmentDirection::Decrease => -quantity,
    };

    let txn = db.begin().await?;

    let product = find_live_product(&txn, product_id).await?;

    record_transaction(
        &txn,
        product_id,
        delta,
        inventory_transaction::TYPE_ADJUSTMENT,
        None,
        operator_id,
        notes,
    )
    .await?;

    match direction {
        AdjustmentDirection::Increase => increment_stock(&txn, product_id, quantity).await?,
        AdjustmentDirection::Decrease => decrement_stock(&txn, product_id, quantity).await?,
    }

    let updated = find_live_product(&txn, product_id).await?;
    txn.commit().await?;

    info!(
        product = %product.name,
        delta,
        new_stock = updated.stock_quantity,
        "stock adjustment recorded"
    );
    Ok(updated)
}

/// Retrieves the full ledger for one product, newest first.
pub async fn get_transactions_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<inventory_transaction::Model>> {
    use sea_orm::QueryOrder;

    crate::entities::InventoryTransaction::find()
        .filter(inventory_transaction::Column::ProductId.eq(product_id))
        .order_by_desc(inventory_transaction::Column::CreatedAt)
        .order_by_desc(inventory_transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up a product that exists and is not soft-deleted.
async fn find_live_product<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    if product.is_deleted {
        return Err(Error::ProductNotFound { id: product_id });
    }
    Ok(product)
}

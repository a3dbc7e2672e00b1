//! Checkout business logic - turning the cart into a persisted sale.
//!
//! The write sequence (receipt number, sale, sale items, ledger entries,
//! stock decrements) runs inside a single database transaction: either the
//! whole sale lands or none of it does. There is no orphaned-sale state and
//! no per-line continue-on-error; a line that cannot be satisfied rolls the
//! entire checkout back.

use crate::{
    core::{cart::Cart, inventory, shift},
    entities::{SaleItem, SystemState, inventory_transaction, sale, sale_item, system_state},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Default payment method tag for drawer sales.
pub const PAYMENT_METHOD_CASH: &str = "cash";

/// Receipt number used by [`preview_receipt`]; never persisted.
pub const PREVIEW_RECEIPT_NUMBER: &str = "PREVIEW";

/// System-state key holding the last issued receipt counter value.
const RECEIPT_COUNTER_KEY: &str = "receipt_counter";

/// One printed line of a receipt, snapshotted at checkout time.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product name as sold
    pub product_name: String,
    /// Units sold
    pub quantity: i32,
    /// Unit price at checkout time
    pub unit_price: f64,
    /// quantity x unit price
    pub subtotal: f64,
}

/// A completed (or previewed) sale in presentable form.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Persisted sale id; None for previews
    pub sale_id: Option<i64>,
    /// Unique receipt label, or `"PREVIEW"`
    pub receipt_number: String,
    /// Grand total charged
    pub total_amount: f64,
    /// Tax portion of the total
    pub tax_amount: f64,
    /// Payment method tag
    pub payment_method: String,
    /// When the sale completed (or the preview was taken)
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Snapshotted lines
    pub items: Vec<ReceiptLine>,
}

/// Completes the sale currently in the cart.
///
/// Preconditions, checked in order, each a hard stop with zero writes:
/// 1. the operator has an active shift;
/// 2. the cart is non-empty.
///
/// Then, atomically: allocates a receipt number, inserts the sale and its
/// line items, appends one `"sale"` ledger entry per line, and applies one
/// conditional stock decrement per line. A decrement that finds the shelf
/// already depleted (another terminal sold the same product first) fails
/// the whole transaction, so the persisted state never shows a sale whose
/// stock was not taken.
///
/// On success the cart is cleared and the receipt returned.
pub async fn checkout(
    db: &DatabaseConnection,
    cart: &mut Cart,
    operator_id: &str,
    payment_method: &str,
) -> Result<Receipt> {
    let active_shift = shift::get_active_shift(db, operator_id)
        .await?
        .ok_or(Error::NoActiveShift)?;

    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    let total_amount = cart.grand_total();
    let tax_amount = cart.tax();
    let created_at = chrono::Utc::now();

    let txn = db.begin().await?;

    let receipt_number = next_receipt_number(&txn).await?;

    let sale_row = sale::ActiveModel {
        shift_id: Set(active_shift.id),
        operator_id: Set(operator_id.to_string()),
        total_amount: Set(total_amount),
        tax_amount: Set(tax_amount),
        payment_method: Set(payment_method.to_string()),
        receipt_number: Set(receipt_number),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let items: Vec<sale_item::ActiveModel> = cart
        .lines()
        .iter()
        .map(|line| sale_item::ActiveModel {
            sale_id: Set(sale_row.id),
            product_id: Set(line.product.id),
            quantity: Set(line.quantity),
            unit_price: Set(line.product.price),
            subtotal: Set(line.subtotal),
            ..Default::default()
        })
        .collect();
    SaleItem::insert_many(items).exec(&txn).await?;

    for line in cart.lines() {
        inventory::record_transaction(
            &txn,
            line.product.id,
            -line.quantity,
            inventory_transaction::TYPE_SALE,
            Some(sale_row.id),
            operator_id,
            None,
        )
        .await?;
        inventory::decrement_stock(&txn, line.product.id, line.quantity).await?;
    }

    txn.commit().await?;

    let receipt = Receipt {
        sale_id: Some(sale_row.id),
        receipt_number: sale_row.receipt_number,
        total_amount,
        tax_amount,
        payment_method: payment_method.to_string(),
        created_at,
        items: receipt_lines(cart),
    };

    cart.clear();

    info!(
        receipt = %receipt.receipt_number,
        shift_id = active_shift.id,
        total = total_amount,
        lines = receipt.items.len(),
        "sale completed"
    );
    Ok(receipt)
}

/// Builds a receipt straight from the live cart for print preview.
///
/// Touches nothing: no persistence, no receipt number consumed, cart and
/// shift state unchanged.
///
/// # Errors
/// [`Error::EmptyCart`] if there is nothing to preview.
pub fn preview_receipt(cart: &Cart) -> Result<Receipt> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    Ok(Receipt {
        sale_id: None,
        receipt_number: PREVIEW_RECEIPT_NUMBER.to_string(),
        total_amount: cart.grand_total(),
        tax_amount: cart.tax(),
        payment_method: "preview".to_string(),
        created_at: chrono::Utc::now(),
        items: receipt_lines(cart),
    })
}

fn receipt_lines(cart: &Cart) -> Vec<ReceiptLine> {
    cart.lines()
        .iter()
        .map(|line| ReceiptLine {
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            subtotal: line.subtotal,
        })
        .collect()
}

/// Allocates the next receipt number from the persistent counter.
///
/// Must be called inside the checkout transaction: the counter row update
/// commits or rolls back together with the sale, which is what makes the
/// numbers unique and gap-free on the happy path.
async fn next_receipt_number<C>(db: &C) -> Result<String>
where
    C: ConnectionTrait,
{
    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(RECEIPT_COUNTER_KEY))
        .one(db)
        .await?;

    let now = chrono::Utc::now().naive_utc();
    let next = match &existing {
        Some(row) => {
            let current: u64 = row.value.parse().map_err(|_| Error::ReceiptCounterCorrupt {
                message: format!("expected an integer, found {:?}", row.value),
            })?;
            current + 1
        }
        None => 1,
    };

    match existing {
        Some(row) => {
            let mut state: system_state::ActiveModel = row.into();
            state.value = Set(next.to_string());
            state.updated_at = Set(now);
            state.update(db).await?;
        }
        None => {
            system_state::ActiveModel {
                key: Set(RECEIPT_COUNTER_KEY.to_string()),
                value: Set(next.to_string()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    Ok(format!("RCP-{next:06}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::inventory::{AdjustmentDirection, adjust_stock};
    use crate::entities::{InventoryTransaction, Product, Sale};
    use crate::test_utils::{create_test_product, setup_test_db, start_test_shift};
    use sea_orm::QueryOrder;

    async fn assert_zero_writes(db: &DatabaseConnection) {
        assert!(Sale::find().all(db).await.unwrap().is_empty());
        assert!(SaleItem::find().all(db).await.unwrap().is_empty());
        assert!(
            InventoryTransaction::find()
                .filter(
                    inventory_transaction::Column::TransactionType
                        .eq(inventory_transaction::TYPE_SALE)
                )
                .all(db)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_checkout_requires_active_shift() -> Result<()> {
        let db = setup_test_db().await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;

        let result = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await;
        assert!(matches!(result, Err(Error::NoActiveShift)));
        assert_zero_writes(&db).await;

        // The cart is untouched by the rejected attempt.
        assert_eq!(cart.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() -> Result<()> {
        let db = setup_test_db().await?;
        start_test_shift(&db, "op-1").await?;

        let mut cart = Cart::new();
        let result = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await;
        assert!(matches!(result, Err(Error::EmptyCart)));
        assert_zero_writes(&db).await;

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_two_line_sale() -> Result<()> {
        let db = setup_test_db().await?;
        let shift = start_test_shift(&db, "op-1").await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;
        let bread = create_test_product(&db, "Bread", 5.0, 4).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        cart.add_item(&apple)?;
        cart.add_item(&bread)?;

        let receipt = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await?;

        // Receipt reflects the snapshotted cart.
        assert!((receipt.total_amount - 11.88).abs() < 1e-9);
        assert!((receipt.tax_amount - 0.88).abs() < 1e-9);
        assert_eq!(receipt.payment_method, PAYMENT_METHOD_CASH);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].product_name, "Apple");
        assert_eq!(receipt.items[0].quantity, 2);
        assert_eq!(receipt.items[0].unit_price, 3.0);
        assert_eq!(receipt.items[0].subtotal, 6.0);
        assert_eq!(receipt.items[1].product_name, "Bread");
        assert_eq!(receipt.items[1].quantity, 1);

        // Exactly one sale, attributed to the shift and operator.
        let sales = Sale::find().all(&db).await?;
        assert_eq!(sales.len(), 1);
        let sale_row = &sales[0];
        assert_eq!(sale_row.shift_id, shift.id);
        assert_eq!(sale_row.operator_id, "op-1");
        assert!((sale_row.total_amount - 11.88).abs() < 1e-9);
        assert!((sale_row.tax_amount - 0.88).abs() < 1e-9);
        assert_eq!(Some(sale_row.id), receipt.sale_id);

        // Two sale items with price snapshots.
        let items = SaleItem::find()
            .order_by_asc(sale_item::Column::Id)
            .all(&db)
            .await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, apple.id);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].unit_price, 3.0);
        assert_eq!(items[0].subtotal, 6.0);
        assert_eq!(items[1].product_id, bread.id);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].unit_price, 5.0);

        // Two ledger entries with deltas -2 and -1, referencing the sale.
        let ledger = InventoryTransaction::find()
            .order_by_asc(inventory_transaction::Column::Id)
            .all(&db)
            .await?;
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].quantity, -2);
        assert_eq!(ledger[1].quantity, -1);
        for entry in &ledger {
            assert_eq!(entry.transaction_type, inventory_transaction::TYPE_SALE);
            assert_eq!(entry.reference_id, Some(sale_row.id));
        }

        // Stock counters decremented per line.
        let apple_after = Product::find_by_id(apple.id).one(&db).await?.unwrap();
        let bread_after = Product::find_by_id(bread.id).one(&db).await?.unwrap();
        assert_eq!(apple_after.stock_quantity, 8);
        assert_eq!(bread_after.stock_quantity, 3);

        // Cart cleared on success.
        assert!(cart.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_receipt_numbers_unique_and_monotonic() -> Result<()> {
        let db = setup_test_db().await?;
        start_test_shift(&db, "op-1").await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        let first = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await?;

        // A preview between sales must not consume a number.
        cart.add_item(&apple)?;
        let preview = preview_receipt(&cart)?;
        assert_eq!(preview.receipt_number, PREVIEW_RECEIPT_NUMBER);
        assert!(preview.sale_id.is_none());

        let second = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await?;

        assert_eq!(first.receipt_number, "RCP-000001");
        assert_eq!(second.receipt_number, "RCP-000002");
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_rolls_back_on_concurrent_depletion() -> Result<()> {
        let db = setup_test_db().await?;
        start_test_shift(&db, "op-1").await?;
        let apple = create_test_product(&db, "Apple", 3.0, 2).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        cart.add_item(&apple)?;

        // Stock is depleted after the cart snapshot was taken, as another
        // terminal would.
        adjust_stock(&db, apple.id, AdjustmentDirection::Decrease, 1, "op-2", None).await?;

        let result = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            })
        ));

        // The failed checkout left nothing behind: no sale, no items, no
        // sale ledger entries, stock as the adjustment left it.
        assert_zero_writes(&db).await;
        let after = Product::find_by_id(apple.id).one(&db).await?.unwrap();
        assert_eq!(after.stock_quantity, 1);

        // The failed attempt did not burn a receipt number either.
        cart.clear();
        cart.add_item(&apple)?;
        let receipt = checkout(&db, &mut cart, "op-1", PAYMENT_METHOD_CASH).await?;
        assert_eq!(receipt.receipt_number, "RCP-000001");

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_receipt_empty_cart() {
        let cart = Cart::new();
        let result = preview_receipt(&cart);
        assert!(matches!(result, Err(Error::EmptyCart)));
    }

    #[tokio::test]
    async fn test_preview_receipt_mirrors_cart() -> Result<()> {
        let db = setup_test_db().await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        cart.add_item(&apple)?;

        let receipt = preview_receipt(&cart)?;
        assert_eq!(receipt.payment_method, "preview");
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].quantity, 2);
        assert_eq!(receipt.total_amount, cart.grand_total());

        // No side effects on the cart or the store.
        assert_eq!(cart.len(), 1);
        assert_zero_writes(&db).await;
        Ok(())
    }
}

//! Shift reporting and receipt formatting.
//!
//! Structured summaries of a shift's takings plus the plain-text receipt
//! renderer. Everything here is presentation-side: reads and pure
//! formatting, no writes.

use crate::{
    core::checkout::Receipt,
    entities::{Sale, sale, shift},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, prelude::*};

/// Summary of one shift's recorded sales.
#[derive(Debug, Clone)]
pub struct ShiftReport {
    /// The shift being reported on
    pub shift: shift::Model,
    /// Number of completed sales
    pub sales_count: usize,
    /// Sum of sale grand totals
    pub total_sales: f64,
    /// starting cash + total sales
    pub expected_cash: f64,
}

/// Builds the drawer-reconciliation summary for a shift.
///
/// Works for active shifts too, in which case `expected_cash` is the figure
/// the drawer should hold right now.
pub async fn generate_shift_report(
    db: &DatabaseConnection,
    shift_id: i64,
) -> Result<ShiftReport> {
    let shift_row = crate::entities::Shift::find_by_id(shift_id)
        .one(db)
        .await?
        .ok_or(Error::ShiftNotFound { id: shift_id })?;

    let sales = Sale::find()
        .filter(sale::Column::ShiftId.eq(shift_id))
        .all(db)
        .await?;

    let total_sales: f64 = sales.iter().map(|s| s.total_amount).sum();
    let expected_cash = shift_row.starting_cash + total_sales;

    Ok(ShiftReport {
        shift: shift_row,
        sales_count: sales.len(),
        total_sales,
        expected_cash,
    })
}

/// Formats a dollar amount for display, e.g. `$11.88` or `-$4.50`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Renders a receipt as plain text for printing.
///
/// The subtotal line is derived from the stored total and tax; the per-line
/// figures are the snapshots taken at checkout.
#[must_use]
pub fn format_receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    out.push_str(&format!("RECEIPT {}\n", receipt.receipt_number));
    out.push_str(&format!(
        "{}\n",
        receipt.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str("--------------------------------\n");

    for item in &receipt.items {
        out.push_str(&format!(
            "{} x {} @ {} {}\n",
            item.quantity,
            item.product_name,
            format_money(item.unit_price),
            format_money(item.subtotal)
        ));
    }

    out.push_str("--------------------------------\n");
    out.push_str(&format!(
        "Subtotal {}\n",
        format_money(receipt.total_amount - receipt.tax_amount)
    ));
    out.push_str(&format!("Tax      {}\n", format_money(receipt.tax_amount)));
    out.push_str(&format!(
        "Total    {}\n",
        format_money(receipt.total_amount)
    ));
    out.push_str(&format!("Paid by  {}\n", receipt.payment_method));
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{cart::Cart, checkout};
    use crate::test_utils::{create_test_product, setup_test_db, start_test_shift};

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(11.88), "$11.88");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-4.5), "-$4.50");
        assert_eq!(format_money(3.0), "$3.00");
    }

    #[tokio::test]
    async fn test_generate_shift_report() -> Result<()> {
        let db = setup_test_db().await?;
        let shift = start_test_shift(&db, "op-1").await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;
        let bread = create_test_product(&db, "Bread", 5.0, 10).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        cart.add_item(&apple)?;
        cart.add_item(&bread)?;
        checkout::checkout(&db, &mut cart, "op-1", checkout::PAYMENT_METHOD_CASH).await?;

        let report = generate_shift_report(&db, shift.id).await?;
        assert_eq!(report.sales_count, 1);
        assert!((report.total_sales - 11.88).abs() < 1e-9);
        // start_test_shift opens the drawer with $100.00.
        assert!((report.expected_cash - 111.88).abs() < 1e-9);

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_shift_report_missing_shift() -> Result<()> {
        let db = setup_test_db().await?;
        let result = generate_shift_report(&db, 42).await;
        assert!(matches!(result, Err(Error::ShiftNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_format_receipt_lists_every_line() -> Result<()> {
        let db = setup_test_db().await?;
        start_test_shift(&db, "op-1").await?;
        let apple = create_test_product(&db, "Apple", 3.0, 10).await?;
        let bread = create_test_product(&db, "Bread", 5.0, 10).await?;

        let mut cart = Cart::new();
        cart.add_item(&apple)?;
        cart.add_item(&apple)?;
        cart.add_item(&bread)?;
        let receipt =
            checkout::checkout(&db, &mut cart, "op-1", checkout::PAYMENT_METHOD_CASH).await?;

        let text = format_receipt(&receipt);
        assert!(text.contains("RCP-000001"));
        assert!(text.contains("2 x Apple @ $3.00 $6.00"));
        assert!(text.contains("1 x Bread @ $5.00 $5.00"));
        assert!(text.contains("Subtotal $11.00"));
        assert!(text.contains("Tax      $0.88"));
        assert!(text.contains("Total    $11.88"));
        assert!(text.contains("Paid by  cash"));

        Ok(())
    }
}

//! Shift business logic - the cash-drawer session gating all selling.
//!
//! A shift moves through exactly one transition each way:
//! no shift -> active -> closed, with no reopening. The single-active-shift
//! invariant is enforced twice: an application-level existence check keeps
//! `start_shift` idempotent for the common double-submit case, and the
//! partial unique index installed by
//! [`crate::config::database::create_tables`] rejects whatever races past it.

use crate::{
    entities::{Sale, Shift, sale, shift},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Returns the operator's currently open shift, if any.
///
/// Most-recent-first, limit-1 lookup over `status = "active"`.
pub async fn get_active_shift(
    db: &DatabaseConnection,
    operator_id: &str,
) -> Result<Option<shift::Model>> {
    Shift::find()
        .filter(shift::Column::OperatorId.eq(operator_id))
        .filter(shift::Column::Status.eq(shift::STATUS_ACTIVE))
        .order_by_desc(shift::Column::StartTime)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Opens a shift for the operator with the given drawer float.
///
/// If the operator already has an active shift, that shift is returned and
/// nothing is inserted, so a double-submitted start request succeeds
/// harmlessly.
///
/// # Errors
/// - [`Error::InvalidAmount`] if `starting_cash` is negative or not finite
/// - [`Error::Database`] if the insert fails (including the partial unique
///   index rejecting a concurrent duplicate)
pub async fn start_shift(
    db: &DatabaseConnection,
    operator_id: &str,
    starting_cash: f64,
) -> Result<shift::Model> {
    if !starting_cash.is_finite() || starting_cash < 0.0 {
        return Err(Error::InvalidAmount {
            amount: starting_cash,
        });
    }

    if let Some(existing) = get_active_shift(db, operator_id).await? {
        info!(
            shift_id = existing.id,
            operator = operator_id,
            "start requested while a shift is already open"
        );
        return Ok(existing);
    }

    let new_shift = shift::ActiveModel {
        operator_id: Set(operator_id.to_string()),
        starting_cash: Set(starting_cash),
        status: Set(shift::STATUS_ACTIVE.to_string()),
        start_time: Set(chrono::Utc::now()),
        end_time: Set(None),
        closing_cash: Set(None),
        expected_cash: Set(None),
        ..Default::default()
    };

    let created = new_shift.insert(db).await?;
    info!(
        shift_id = created.id,
        operator = operator_id,
        starting_cash,
        "shift started"
    );
    Ok(created)
}

/// Closes an active shift, reconciling the drawer.
///
/// Inside one database transaction: sums the sales recorded against the
/// shift, sets `expected_cash = starting_cash + total_sales`, stores the
/// manually counted `closing_cash`, stamps `end_time`, and flips the status
/// to `"closed"`.
///
/// # Errors
/// - [`Error::InvalidAmount`] if `closing_cash` is negative or not finite
/// - [`Error::ShiftNotFound`] / [`Error::ShiftNotActive`] guards
pub async fn end_shift(
    db: &DatabaseConnection,
    shift_id: i64,
    closing_cash: f64,
) -> Result<shift::Model> {
    if !closing_cash.is_finite() || closing_cash < 0.0 {
        return Err(Error::InvalidAmount {
            amount: closing_cash,
        });
    }

    let txn = db.begin().await?;

    let current = Shift::find_by_id(shift_id)
        .one(&txn)
        .await?
        .ok_or(Error::ShiftNotFound { id: shift_id })?;

    if current.status != shift::STATUS_ACTIVE {
        return Err(Error::ShiftNotActive { id: shift_id });
    }

    let total_sales = shift_sales_total(&txn, shift_id).await?;
    let expected_cash = current.starting_cash + total_sales;

    let mut active: shift::ActiveModel = current.into();
    active.status = Set(shift::STATUS_CLOSED.to_string());
    active.end_time = Set(Some(chrono::Utc::now()));
    active.closing_cash = Set(Some(closing_cash));
    active.expected_cash = Set(Some(expected_cash));
    let closed = active.update(&txn).await?;

    txn.commit().await?;

    info!(
        shift_id,
        total_sales, expected_cash, closing_cash, "shift closed"
    );
    Ok(closed)
}

/// Sums the grand totals of all sales recorded against a shift.
pub async fn shift_sales_total<C>(db: &C, shift_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    let sales = Sale::find()
        .filter(sale::Column::ShiftId.eq(shift_id))
        .all(db)
        .await?;
    Ok(sales.iter().map(|s| s.total_amount).sum())
}

/// Lists all shifts for an operator, newest first. Used by the shift
/// history screen.
pub async fn get_shifts_for_operator(
    db: &DatabaseConnection,
    operator_id: &str,
) -> Result<Vec<shift::Model>> {
    Shift::find()
        .filter(shift::Column::OperatorId.eq(operator_id))
        .order_by_desc(shift::Column::StartTime)
        .all(db)
        .await
        .map_err(Into::into)
}

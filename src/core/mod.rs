//! Core business logic - framework-agnostic POS operations.
//!
//! These modules contain everything the register does, independent of any
//! presentation layer: the in-memory cart, shift lifecycle, the atomic
//! checkout procedure, stock movements, catalog management, and reporting.

/// In-memory cart with derived totals
pub mod cart;
/// Atomic checkout procedure and receipt preview
pub mod checkout;
/// Stock counters, ledger entries, restock and adjustment
pub mod inventory;
/// Catalog management and seeding
pub mod product;
/// Shift summaries and receipt formatting
pub mod report;
/// Cash-drawer shift lifecycle
pub mod shift;

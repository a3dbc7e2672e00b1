//! Inventory transaction entity - Append-only stock ledger.
//!
//! Every change to a product's stock counter is mirrored by one ledger row
//! carrying the signed delta: negative for sales, positive for restocks,
//! signed either way for manual adjustments. Rows are never updated or
//! deleted; they exist as an audit trail alongside the live counter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger entry written by checkout
pub const TYPE_SALE: &str = "sale";
/// Ledger entry written by a restock
pub const TYPE_RESTOCK: &str = "restock";
/// Ledger entry written by a manual adjustment
pub const TYPE_ADJUSTMENT: &str = "adjustment";

/// Inventory transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    /// Unique identifier for the ledger entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product whose stock changed
    pub product_id: i64,
    /// Signed quantity delta applied to the stock counter
    pub quantity: i32,
    /// `"sale"`, `"restock"`, or `"adjustment"`
    pub transaction_type: String,
    /// Originating sale for `"sale"` entries, None otherwise
    pub reference_id: Option<i64>,
    /// Operator who caused the change
    pub operator_id: String,
    /// Optional free-text reason (restocks and adjustments)
    pub notes: Option<String>,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between InventoryTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ledger entry references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

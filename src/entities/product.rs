//! Product entity - Represents an item in the store catalog.
//!
//! Each product carries a unit price and a denormalized `stock_quantity`
//! counter. The counter is the live stock figure used by the cart's ceiling
//! checks and by checkout; the audit history lives in
//! [`super::inventory_transaction`] and is never replayed to derive it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Whole Milk 1L")
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Optional scan code
    pub barcode: Option<String>,
    /// Optional free-text description
    pub description: Option<String>,
    /// Live stock counter; kept non-negative by conditional decrements
    pub stock_quantity: i32,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears on many sale lines
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItems,
    /// One product accumulates many ledger entries
    #[sea_orm(has_many = "super::inventory_transaction::Entity")]
    InventoryTransactions,
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl Related<super::inventory_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

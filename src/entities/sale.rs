//! Sale entity - The record of one completed checkout.
//!
//! A sale is written once, inside the checkout transaction, and is immutable
//! afterwards. Line detail lives in [`super::sale_item`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier for the sale
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Shift under which the sale was rung up
    pub shift_id: i64,
    /// Operator who completed the sale
    pub operator_id: String,
    /// Grand total (subtotal + tax) in dollars
    pub total_amount: f64,
    /// Tax portion of the total in dollars
    pub tax_amount: f64,
    /// Payment method tag (e.g., `"cash"`)
    pub payment_method: String,
    /// Unique receipt label issued at checkout
    #[sea_orm(unique)]
    pub receipt_number: String,
    /// When the sale was completed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sale belongs to one shift
    #[sea_orm(
        belongs_to = "super::shift::Entity",
        from = "Column::ShiftId",
        to = "super::shift::Column::Id"
    )]
    Shift,
    /// One sale has many line items
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItems,
}

impl Related<super::shift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shift.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

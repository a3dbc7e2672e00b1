//! Shift entity - Represents one operator's cash-drawer session.
//!
//! A shift runs from an explicit start to an explicit close and never
//! reopens. The schema layer enforces "at most one active shift per
//! operator" with a partial unique index on `(operator_id)` where
//! `status = 'active'` (see [`crate::config::database::create_tables`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status value for an open shift
pub const STATUS_ACTIVE: &str = "active";
/// Status value for a closed shift
pub const STATUS_CLOSED: &str = "closed";

/// Shift database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    /// Unique identifier for the shift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque identifier of the operator who owns the drawer
    pub operator_id: String,
    /// Cash in the drawer when the shift opened
    pub starting_cash: f64,
    /// `"active"` or `"closed"`
    pub status: String,
    /// When the shift opened
    pub start_time: DateTimeUtc,
    /// When the shift closed, None while active
    pub end_time: Option<DateTimeUtc>,
    /// Manually counted cash at close, None while active
    pub closing_cash: Option<f64>,
    /// `starting_cash` + recorded sales, computed at close
    pub expected_cash: Option<f64>,
}

/// Defines relationships between Shift and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One shift records many sales
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod inventory_transaction;
pub mod product;
pub mod sale;
pub mod sale_item;
pub mod shift;
pub mod system_state;

// Re-export specific types to avoid conflicts
pub use inventory_transaction::{
    Column as InventoryTransactionColumn, Entity as InventoryTransaction,
    Model as InventoryTransactionModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use sale_item::{Column as SaleItemColumn, Entity as SaleItem, Model as SaleItemModel};
pub use shift::{Column as ShiftColumn, Entity as Shift, Model as ShiftModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};

//! Inventory
//!
//! Row-locked access to product stock. Every write to `products.available`
//! goes through [`PgInventoryRepository::write_changes`], which persists the
//! levels an [`InventoryLedger`](venda::inventory::InventoryLedger) reports
//! as changed.

mod repository;

pub(crate) use repository::{LockedStock, PgInventoryRepository, catalog_product_from_row};

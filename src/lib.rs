//! Venda
//!
//! Venda is the domain core of a food-delivery marketplace: single-store carts,
//! checkout into orders with frozen prices, stock reservation, and the order
//! status state machine. Persistence and HTTP live in the `venda-app` and
//! `venda-json` crates.

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod inventory;
pub mod orders;
pub mod principal;
pub mod uuids;

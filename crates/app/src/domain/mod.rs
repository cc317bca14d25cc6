//! Venda Domain Concerns

pub mod carts;
pub mod checkout;
pub mod customers;
pub(crate) mod inventory;
pub mod orders;
pub mod products;
pub mod stores;

//! Carts
//!
//! One cart per customer, created on first access. Lines are validated by the
//! [`venda::carts::Cart`] aggregate before they are written, and totals are
//! computed from current product prices on every read.

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;

pub(crate) use repositories::{PgCartItemsRepository, PgCartsRepository};

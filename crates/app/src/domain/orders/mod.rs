//! Orders
//!
//! Orders are created by checkout and never deleted. After creation only the
//! status changes, through [`venda::orders::plan_transition`].

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;

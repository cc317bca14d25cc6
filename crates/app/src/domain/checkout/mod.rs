//! Checkout
//!
//! Converts a customer's cart into an order in a single transaction.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;

//! Stores

mod errors;
pub(crate) mod handlers;
mod models;

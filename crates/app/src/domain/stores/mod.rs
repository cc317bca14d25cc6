//! Stores

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::StoresServiceError;
pub use service::*;

pub(crate) use repository::PgStoresRepository;

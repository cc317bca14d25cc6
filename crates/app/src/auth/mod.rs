//! Authentication
//!
//! Bearer tokens are opaque random strings. Only their SHA-256 digest is
//! stored, and each token acts for exactly one customer or one store.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;

//! Product Models

use jiff::Timestamp;
use venda::catalog::CatalogProduct;

pub use venda::{catalog::ProductUuid, principal::StoreUuid};

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub store: StoreUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub available: u32,
    pub is_available: bool,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// The fields checkout and carts work with.
    #[must_use]
    pub fn catalog(&self) -> CatalogProduct {
        CatalogProduct {
            uuid: self.uuid,
            store: self.store,
            price: self.price,
            available: self.available,
            is_available: self.is_available,
            active: self.active,
        }
    }
}

/// Product listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products of this store
    pub store: Option<StoreUuid>,

    /// Case-insensitive substring of the name or description
    pub search: Option<String>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub available: u32,
}

/// Product Update Model
///
/// Stock is not part of an update; it changes through restocking and orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub active: Option<bool>,
}

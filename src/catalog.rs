//! Catalog

use crate::{principal::StoreUuid, uuids::TypedUuid};

/// Catalog product marker
#[derive(Debug)]
pub struct CatalogEntry;

/// Product UUID
pub type ProductUuid = TypedUuid<CatalogEntry>;

/// Largest stock a product can hold (the `INTEGER` column range).
pub const MAX_STOCK: u32 = i32::MAX.unsigned_abs();

/// Largest price or order total in centavos (the `BIGINT` column range).
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// The parts of a store's product the checkout flow reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    /// Product id
    pub uuid: ProductUuid,

    /// Store that sells the product
    pub store: StoreUuid,

    /// Current unit price in centavos
    pub price: u64,

    /// Units currently in stock
    pub available: u32,

    /// Whether the product may be added to carts
    pub is_available: bool,

    /// Whether the product is listed at all
    pub active: bool,
}

impl CatalogProduct {
    /// Units a customer may currently put in a cart.
    #[must_use]
    pub const fn sellable_quantity(&self) -> u32 {
        if self.is_available { self.available } else { 0 }
    }
}

//! Inventory Ledger
//!
//! The ledger is the only place where a product's available quantity
//! changes. Storage loads the affected rows under a row lock, the ledger
//! applies reservations and releases in memory, and storage writes back the
//! levels the ledger reports as changed, all inside one transaction.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::{CatalogProduct, MAX_STOCK, ProductUuid};

/// Errors raised by stock adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// More units were requested than are in stock.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Offending product
        product: ProductUuid,

        /// Units requested
        requested: u32,

        /// Units in stock
        available: u32,
    },

    /// A release would push the stock past [`MAX_STOCK`].
    #[error("stock for product {0} would overflow")]
    Overflow(ProductUuid),

    /// The product was not loaded into the ledger.
    #[error("product {0} is not tracked by this ledger")]
    Untracked(ProductUuid),
}

/// Available quantity of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    /// Product id
    pub product: ProductUuid,

    /// Units in stock
    pub available: u32,

    /// Whether the product can be added to carts
    pub is_available: bool,
}

impl StockLevel {
    /// Stock level of a catalog product.
    #[must_use]
    pub const fn of(product: &CatalogProduct) -> Self {
        Self {
            product: product.uuid,
            available: product.available,
            is_available: product.is_available,
        }
    }

    /// Take `quantity` units out of stock.
    ///
    /// Reaching zero marks the product unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InsufficientStock`] when `quantity` exceeds
    /// the available units; the level is left untouched.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), InventoryError> {
        let remaining =
            self.available
                .checked_sub(quantity)
                .ok_or(InventoryError::InsufficientStock {
                    product: self.product,
                    requested: quantity,
                    available: self.available,
                })?;

        self.available = remaining;

        if remaining == 0 {
            self.is_available = false;
        }

        Ok(())
    }

    /// Put `quantity` units back into stock.
    ///
    /// A product that had run out becomes available again.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Overflow`] when the new level exceeds
    /// [`MAX_STOCK`]; the level is left untouched.
    pub fn release(&mut self, quantity: u32) -> Result<(), InventoryError> {
        let was_empty = self.available == 0;

        self.available = self
            .available
            .checked_add(quantity)
            .filter(|available| *available <= MAX_STOCK)
            .ok_or(InventoryError::Overflow(self.product))?;

        if was_empty && self.available > 0 {
            self.is_available = true;
        }

        Ok(())
    }
}

/// A set of locked stock levels and the adjustments applied to them.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    levels: BTreeMap<ProductUuid, StockLevel>,
    original: BTreeMap<ProductUuid, StockLevel>,
}

impl InventoryLedger {
    /// Build a ledger over the given levels.
    pub fn new(levels: impl IntoIterator<Item = StockLevel>) -> Self {
        let levels: BTreeMap<_, _> = levels
            .into_iter()
            .map(|level| (level.product, level))
            .collect();

        Self {
            original: levels.clone(),
            levels,
        }
    }

    /// Build a ledger over the stock of the given products.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a CatalogProduct>) -> Self {
        Self::new(products.into_iter().map(StockLevel::of))
    }

    /// Current level of a tracked product.
    #[must_use]
    pub fn level(&self, product: ProductUuid) -> Option<&StockLevel> {
        self.levels.get(&product)
    }

    /// Reserve `quantity` units of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error when the product is untracked or out of stock.
    pub fn reserve(&mut self, product: ProductUuid, quantity: u32) -> Result<(), InventoryError> {
        self.levels
            .get_mut(&product)
            .ok_or(InventoryError::Untracked(product))?
            .reserve(quantity)
    }

    /// Release `quantity` units of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error when the product is untracked or the level overflows.
    pub fn release(&mut self, product: ProductUuid, quantity: u32) -> Result<(), InventoryError> {
        self.levels
            .get_mut(&product)
            .ok_or(InventoryError::Untracked(product))?
            .release(quantity)
    }

    /// Levels that differ from what was loaded, in product order.
    pub fn changed(&self) -> impl Iterator<Item = &StockLevel> {
        self.levels
            .values()
            .filter(|level| self.original.get(&level.product) != Some(*level))
    }
}

//! Cart Aggregate
//!
//! A cart holds one line per product, all from the same store. Line
//! subtotals and the cart total are always computed from the product price
//! the line was loaded with, which storage reads fresh on every access.

use jiff::civil::Date;
use thiserror::Error;

use crate::{
    catalog::{CatalogProduct, ProductUuid},
    inventory::InventoryError,
    principal::StoreUuid,
};

/// Errors raised by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Line quantities start at one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The product is not listed.
    #[error("product {0} is not on sale")]
    ProductInactive(ProductUuid),

    /// The product belongs to a different store than the cart's lines.
    #[error("product {product} belongs to store {product_store}, but the cart holds items from store {cart_store}")]
    CrossStore {
        /// Offending product
        product: ProductUuid,

        /// Store of the offending product
        product_store: StoreUuid,

        /// Store already represented in the cart
        cart_store: StoreUuid,
    },

    /// The requested quantity is not in stock.
    #[error(transparent)]
    Stock(#[from] InventoryError),

    /// The cart has no line for the product.
    #[error("cart has no item for product {0}")]
    ItemNotFound(ProductUuid),
}

/// Cart line with the product as currently stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product with its live price and stock
    pub product: CatalogProduct,

    /// Units requested
    pub quantity: u32,

    /// Optional pick-up/delivery date chosen for the line
    pub fulfillment_date: Option<Date>,
}

impl CartLine {
    /// Quantity times the live unit price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Rebuild a cart from its stored lines.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The store every line belongs to.
    #[must_use]
    pub fn store(&self) -> Option<StoreUuid> {
        self.lines.first().map(|line| line.product.store)
    }

    /// Line for a product.
    #[must_use]
    pub fn line(&self, product: ProductUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.uuid == product)
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// A `fulfillment_date` given on re-add replaces the line's date.
    ///
    /// # Errors
    ///
    /// Fails without touching the cart when the quantity is zero, the
    /// product is inactive, it comes from another store, or the cumulative
    /// quantity exceeds the stock.
    pub fn add_item(
        &mut self,
        product: CatalogProduct,
        quantity: u32,
        fulfillment_date: Option<Date>,
    ) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if !product.active {
            return Err(CartError::ProductInactive(product.uuid));
        }

        if let Some(cart_store) = self.store()
            && cart_store != product.store
        {
            return Err(CartError::CrossStore {
                product: product.uuid,
                product_store: product.store,
                cart_store,
            });
        }

        let position = self
            .lines
            .iter()
            .position(|line| line.product.uuid == product.uuid);

        let existing = position
            .and_then(|index| self.lines.get(index))
            .map_or(0, |line| line.quantity);

        let requested = existing.saturating_add(quantity);

        ensure_in_stock(&product, requested)?;

        let index = if let Some(index) = position {
            index
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 0,
                fulfillment_date: None,
            });

            self.lines.len() - 1
        };

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::ItemNotFound(product.uuid))?;

        line.product = product;
        line.quantity = requested;

        if fulfillment_date.is_some() {
            line.fulfillment_date = fulfillment_date;
        }

        Ok(line)
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Fails when the quantity is zero, there is no line for the product, or
    /// the quantity exceeds the stock.
    pub fn set_quantity(
        &mut self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product.uuid == product)
            .ok_or(CartError::ItemNotFound(product))?;

        ensure_in_stock(&line.product, quantity)?;

        line.quantity = quantity;

        Ok(line)
    }

    /// Remove the line for a product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when there is no such line.
    pub fn remove_item(&mut self, product: ProductUuid) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product.uuid == product)
            .ok_or(CartError::ItemNotFound(product))?;

        Ok(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line subtotals at current prices.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0_u64, |total, line| total.saturating_add(line.subtotal()))
    }
}

fn ensure_in_stock(product: &CatalogProduct, requested: u32) -> Result<(), InventoryError> {
    let available = product.sellable_quantity();

    if requested > available {
        return Err(InventoryError::InsufficientStock {
            product: product.uuid,
            requested,
            available,
        });
    }

    Ok(())
}

//! Cart Models

use jiff::{Timestamp, civil::Date};
use venda::uuids::TypedUuid;

pub use venda::{
    catalog::ProductUuid,
    principal::{CustomerUuid, StoreUuid},
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub customer: CustomerUuid,
    pub store: Option<StoreUuid>,
    pub total: u64,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub subtotal: u64,
    pub fulfillment_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// NewCartItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product: ProductUuid,
    pub quantity: u32,
    pub fulfillment_date: Option<Date>,
}

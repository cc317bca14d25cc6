//! Order Models

use jiff::{Timestamp, civil::Date};
use venda::uuids::TypedUuid;

pub use venda::{
    catalog::ProductUuid,
    checkout::{AddressUuid, PaymentMethodUuid},
    orders::{OrderCode, OrderStatus, OrderUuid},
    principal::{CustomerUuid, StoreUuid},
};

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub code: OrderCode,
    pub customer: CustomerUuid,
    pub store: StoreUuid,
    pub payment_method: PaymentMethodUuid,
    pub address: AddressUuid,
    pub status: OrderStatus,
    pub total: u64,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub fulfillment_date: Option<Date>,
}

impl OrderItem {
    /// Quantity times the snapshotted price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::orders::models::{Order, OrderItem};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Short reference shown to the customer and the store
    pub code: String,

    /// The customer who placed the order
    pub customer_uuid: Uuid,

    /// The store fulfilling the order
    pub store_uuid: Uuid,

    /// Payment method charged
    pub payment_method_uuid: Uuid,

    /// Delivery address
    pub address_uuid: Uuid,

    /// `pending`, `preparing`, `en_route`, `delivered` or `cancelled`
    pub status: String,

    /// Sum of item subtotals at checkout prices, in centavos
    pub total: u64,

    /// The items ordered
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time of the last status change
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            code: order.code.to_string(),
            customer_uuid: order.customer.into(),
            store_uuid: order.store.into(),
            payment_method_uuid: order.payment_method.into(),
            address_uuid: order.address.into(),
            status: order.status.to_string(),
            total: order.total,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The product ordered
    pub product_uuid: Uuid,

    /// Units ordered
    pub quantity: u32,

    /// Unit price at checkout, in centavos
    pub price: u64,

    /// Price times quantity
    pub subtotal: u64,

    /// Requested delivery date (`YYYY-MM-DD`)
    pub fulfillment_date: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product.into(),
            quantity: item.quantity,
            price: item.price,
            subtotal: item.subtotal(),
            fulfillment_date: item.fulfillment_date.map(|date| date.to_string()),
        }
    }
}

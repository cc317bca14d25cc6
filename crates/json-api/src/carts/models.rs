//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::carts::models::{Cart, CartItem};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The store every line belongs to, absent while the cart is empty
    pub store_uuid: Option<Uuid>,

    /// Sum of line subtotals at current prices, in centavos
    pub total: u64,

    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            store_uuid: cart.store.map(Into::into),
            total: cart.total,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The product on this line
    pub product_uuid: Uuid,

    /// The product's current name
    pub product_name: String,

    /// The product's current price, in centavos
    pub unit_price: u64,

    /// Units of the product
    pub quantity: u32,

    /// Unit price times quantity
    pub subtotal: u64,

    /// Requested delivery date (`YYYY-MM-DD`)
    pub fulfillment_date: Option<String>,

    /// The date and time the line was created
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product.into(),
            product_name: item.product_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
            fulfillment_date: item.fulfillment_date.map(|date| date.to_string()),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

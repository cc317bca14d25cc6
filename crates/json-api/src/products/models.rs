//! Product response body.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::products::models::Product;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The store selling the product
    pub store_uuid: Uuid,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Current price, in centavos
    pub price: u64,

    /// Units in stock
    pub available: u32,

    /// Whether any stock is left
    pub is_available: bool,

    /// Whether the product is listed
    pub active: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into(),
            store_uuid: product.store.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            available: product.available,
            is_available: product.is_available,
            active: product.active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

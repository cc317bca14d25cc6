//! Add Cart Item Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::carts::models::NewCartItem;

use crate::{
    carts::{errors::into_status_error, models::CartItemResponse},
    errors,
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Product to add
    pub product_uuid: Uuid,

    /// Units to add; merged into an existing line for the same product
    pub quantity: u32,

    /// Requested delivery date (`YYYY-MM-DD`)
    #[serde(default)]
    pub fulfillment_date: Option<String>,
}

impl TryFrom<AddCartItemRequest> for NewCartItem {
    type Error = StatusError;

    fn try_from(request: AddCartItemRequest) -> Result<Self, Self::Error> {
        let fulfillment_date = request
            .fulfillment_date
            .as_deref()
            .map(str::parse::<Date>)
            .transpose()
            .map_err(|error| errors::bad_request(&error))?;

        Ok(NewCartItem {
            product: request.product_uuid.into(),
            quantity: request.quantity,
            fulfillment_date,
        })
    }
}

/// Add Cart Item Handler
///
/// Adds units of a product to the customer's cart and returns the resulting
/// line.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart line"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or product from another store"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.add",
    skip(json, depot),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let item = NewCartItem::try_from(json.into_inner())?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let line = state
        .app
        .carts
        .add_item(customer, item)
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

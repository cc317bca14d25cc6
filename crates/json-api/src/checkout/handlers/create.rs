//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use venda_app::domain::checkout::models::CheckoutRequest;

use crate::{
    checkout::errors::into_status_error, extensions::*, orders::models::OrderResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCheckoutRequest {
    /// One of the customer's active payment methods
    pub payment_method_uuid: Uuid,

    /// Delivery address; the most recently added one when omitted
    #[serde(default)]
    pub address_uuid: Option<Uuid>,
}

impl From<CreateCheckoutRequest> for CheckoutRequest {
    fn from(request: CreateCheckoutRequest) -> Self {
        CheckoutRequest {
            payment_method: request.payment_method_uuid.into(),
            address: request.address_uuid.map(Into::into),
        }
    }
}

/// Checkout Handler
///
/// Turns the customer's cart into a pending order. Stock is reserved and the
/// cart emptied in the same transaction; on any failure nothing changes.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty cart, missing address or invalid payment method"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let order = state
        .app
        .checkout
        .checkout(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(order_uuid = %order.uuid, code = %order.code, total = order.total, "checked out");

    Ok(Json(order.into()))
}

//! Set Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartItemResponse},
    extensions::*,
    state::State,
};

/// Set Cart Item Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetQuantityRequest {
    /// New quantity for the line
    pub quantity: u32,
}

/// Set Cart Item Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart line"),
        (status_code = StatusCode::NOT_FOUND, description = "No line for this product"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<SetQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let line = state
        .app
        .carts
        .set_quantity(
            customer,
            product.into_inner().into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Customers may cancel their own orders until they leave the kitchen. The
/// reserved stock is released.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cancelled order"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the ordering customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is already en route or finished"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let cancelled = state
        .app
        .orders
        .cancel(principal, order.into())
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order, "order cancelled");

    Ok(Json(cancelled.into()))
}

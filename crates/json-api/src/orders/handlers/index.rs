//! List Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use venda::principal::Principal;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// Customers see their own orders, newest first. Stores see their active
/// orders, oldest first, or with `history=true` their delivered and cancelled
/// orders, most recently closed first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    history: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = match (principal, history.into_inner().unwrap_or_default()) {
        (Principal::Store(store), true) => state.app.orders.list_store_history(store).await,
        _ => state.app.orders.list_orders(principal).await,
    }
    .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

//! List Addresses Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    customers::{errors::into_status_error, models::AddressResponse},
    extensions::*,
    state::State,
};

/// List Addresses Handler
///
/// The authenticated customer's usable addresses, newest first. The first
/// one is used at checkout unless another is named.
#[endpoint(
    tags("addresses"),
    summary = "List Addresses",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Addresses"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<AddressResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let addresses = state
        .app
        .customers
        .list_addresses(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(addresses.into_iter().map(Into::into).collect()))
}

//! Remove Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Remove Address Handler
///
/// The address stops being offered for checkout. Orders already placed keep
/// pointing at it.
#[endpoint(
    tags("addresses"),
    summary = "Remove Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Address removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No such address"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    state
        .app
        .customers
        .remove_address(customer, address.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

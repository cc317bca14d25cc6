//! Remove Payment Method Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Remove Payment Method Handler
///
/// Deactivates the method so checkout rejects it. Orders already paid with it
/// keep their reference.
#[endpoint(
    tags("payment-methods"),
    summary = "Remove Payment Method",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Payment method removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No such payment method"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    method: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    state
        .app
        .customers
        .set_payment_method_active(customer, method.into_inner().into(), false)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

//! List Payment Methods Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    customers::{errors::into_status_error, models::PaymentMethodResponse},
    extensions::*,
    state::State,
};

/// List Payment Methods Handler
///
/// All of the authenticated customer's payment methods, including removed
/// ones, which show as inactive.
#[endpoint(
    tags("payment-methods"),
    summary = "List Payment Methods",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment methods"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentMethodResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let methods = state
        .app
        .customers
        .list_payment_methods(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(methods.into_iter().map(Into::into).collect()))
}

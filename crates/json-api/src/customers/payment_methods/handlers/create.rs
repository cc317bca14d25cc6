//! Add Payment Method Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::customers::models::{NewPaymentMethod, PaymentMethodUuid};

use crate::{
    customers::{errors::into_status_error, models::PaymentMethodResponse},
    extensions::*,
    state::State,
};

/// Add Payment Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentMethodRequest {
    /// Client-chosen id; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Label, e.g. "Visa"
    pub name: String,

    /// Masked details, e.g. "**** 4242"
    #[serde(default)]
    pub details: String,
}

impl From<CreatePaymentMethodRequest> for NewPaymentMethod {
    fn from(request: CreatePaymentMethodRequest) -> Self {
        NewPaymentMethod {
            uuid: request.uuid.map_or_else(PaymentMethodUuid::new, Into::into),
            name: request.name,
            details: request.details,
        }
    }
}

/// Add Payment Method Handler
///
/// The returned `uuid` is what checkout takes as `payment_method_uuid`.
#[endpoint(
    tags("payment-methods"),
    summary = "Add Payment Method",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment method added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer"),
        (status_code = StatusCode::CONFLICT, description = "Payment method already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payment_methods.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentMethodRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentMethodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let method = state
        .app
        .customers
        .add_payment_method(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/payment-methods/{}", method.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(payment_method_uuid = %method.uuid, "added payment method");

    Ok(Json(method.into()))
}

//! Add Address Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::customers::models::{AddressUuid, NewAddress};

use crate::{
    customers::{errors::into_status_error, models::AddressResponse},
    extensions::*,
    state::State,
};

/// Add Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    /// Client-chosen id; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub street: String,

    pub number: String,

    pub district: String,

    pub city: String,

    pub postal_code: String,
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        NewAddress {
            uuid: request.uuid.map_or_else(AddressUuid::new, Into::into),
            street: request.street,
            number: request.number,
            district: request.district,
            city: request.city,
            postal_code: request.postal_code,
        }
    }
}

/// Add Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Add Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer"),
        (status_code = StatusCode::CONFLICT, description = "Address already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let address = state
        .app
        .customers
        .add_address(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/addresses/{}", address.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use venda::principal::{CustomerUuid, Principal};
    use venda_app::domain::customers::CustomersServiceError;

    use crate::test_helpers::{Mocks, make_address};

    use super::*;

    fn make_service(mocks: Mocks, customer: CustomerUuid) -> Service {
        mocks.service_as(
            Principal::Customer(customer),
            Router::with_path("addresses").post(handler),
        )
    }

    fn body(uuid: AddressUuid) -> serde_json::Value {
        json!({
            "uuid": uuid.into_uuid(),
            "street": "Rua Augusta",
            "number": "1500",
            "district": "Consolacao",
            "city": "Sao Paulo",
            "postal_code": "01304-001",
        })
    }

    #[tokio::test]
    async fn test_add_address_returns_201() -> TestResult {
        let customer = CustomerUuid::new();
        let uuid = AddressUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_add_address()
            .once()
            .withf(move |c, address| *c == customer && address.uuid == uuid)
            .return_once(move |_, _| Ok(make_address(uuid, customer)));

        let mut res = TestClient::post("http://example.com/addresses")
            .json(&body(uuid))
            .send(&make_service(mocks, customer))
            .await;

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/addresses/{uuid}")));

        let created: AddressResponse = res.take_json().await?;

        assert_eq!(created.city, "Sao Paulo");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_field_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_add_address()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::InvalidData));

        let res = TestClient::post("http://example.com/addresses")
            .json(&body(AddressUuid::new()))
            .send(&make_service(mocks, CustomerUuid::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_body_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/addresses")
            .json(&json!({ "street": "Rua Augusta" }))
            .send(&make_service(Mocks::default(), CustomerUuid::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

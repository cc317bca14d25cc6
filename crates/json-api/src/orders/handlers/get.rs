//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Visible to the customer who placed the order and the store fulfilling it.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with items"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a party to the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_order(principal, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use venda::principal::{CustomerUuid, Principal, StoreUuid};
    use venda_app::domain::orders::{
        OrdersServiceError,
        models::{OrderStatus, OrderUuid},
    };

    use crate::test_helpers::{Mocks, make_order};

    use super::*;

    fn make_service(mocks: Mocks, principal: Principal) -> Service {
        mocks.service_as(principal, Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_order_returns_items() -> TestResult {
        let customer = CustomerUuid::new();
        let uuid = OrderUuid::new();
        let order = make_order(uuid, customer, StoreUuid::new(), OrderStatus::Preparing);

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |principal, o| *principal == Principal::Customer(customer) && *o == uuid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks, Principal::Customer(customer)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items.iter().map(|item| item.subtotal).sum::<u64>(), body.total);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_foreign_order_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::PermissionDenied));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(mocks, Principal::Store(StoreUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(mocks, Principal::Customer(CustomerUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

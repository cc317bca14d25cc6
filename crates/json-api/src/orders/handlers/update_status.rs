//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use venda_app::domain::orders::models::OrderStatus;

use crate::{
    errors,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status
    pub status: String,
}

/// Update Order Status Handler
///
/// Stores move their orders forward one step at a time. `cancelled` is the
/// customer's cancel and releases the order's stock.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order after the change"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed to make this change"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Illegal transition"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner();

    let status: OrderStatus = json
        .into_inner()
        .status
        .parse()
        .map_err(|error| errors::bad_request(&error))?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", tracing::field::display(status));

    let updated = if status == OrderStatus::Cancelled {
        state.app.orders.cancel(principal, order.into()).await
    } else {
        state
            .app
            .orders
            .update_status(principal, order.into(), status)
            .await
    }
    .map_err(into_status_error)?;

    info!(order_uuid = %order, status = %updated.status, role = principal.role(), "order status changed");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use venda::{
        orders::TransitionError,
        principal::{CustomerUuid, Principal, StoreUuid},
    };
    use venda_app::domain::orders::{OrdersServiceError, models::OrderUuid};

    use crate::test_helpers::{Mocks, make_order};

    use super::*;

    fn make_service(mocks: Mocks, principal: Principal) -> Service {
        mocks.service_as(
            principal,
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_store_advances_order() -> TestResult {
        let store = StoreUuid::new();
        let uuid = OrderUuid::new();
        let order = make_order(uuid, CustomerUuid::new(), store, OrderStatus::Preparing);

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .withf(move |principal, o, status| {
                *principal == Principal::Store(store)
                    && *o == uuid
                    && *status == OrderStatus::Preparing
            })
            .return_once(move |_, _, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "preparing" }))
            .send(&make_service(mocks, Principal::Store(store)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "preparing");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_status_routes_to_cancel() -> TestResult {
        let customer = CustomerUuid::new();
        let uuid = OrderUuid::new();
        let order = make_order(uuid, customer, StoreUuid::new(), OrderStatus::Cancelled);

        let mut mocks = Mocks::default();

        mocks.orders.expect_update_status().never();
        mocks
            .orders
            .expect_cancel()
            .once()
            .withf(move |principal, o| *principal == Principal::Customer(customer) && *o == uuid)
            .return_once(move |_, _| Ok(order));

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(mocks, Principal::Customer(customer)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_skipping_a_step_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .return_once(|_, _, to| {
                Err(OrdersServiceError::InvalidTransition(TransitionError {
                    from: OrderStatus::Pending,
                    to,
                }))
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "delivered" }))
            .send(&make_service(mocks, Principal::Store(StoreUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            res.take_string().await?.contains("invalid_transition"),
            "expected the error kind in the body"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_advancing_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::PermissionDenied));

        let res = TestClient::put(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "preparing" }))
            .send(&make_service(mocks, Principal::Customer(CustomerUuid::new())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::put(format!("http://example.com/orders/{}/status", Uuid::now_v7()))
            .json(&json!({ "status": "teleported" }))
            .send(&make_service(
                Mocks::default(),
                Principal::Store(StoreUuid::new()),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

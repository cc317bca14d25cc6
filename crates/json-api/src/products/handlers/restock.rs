//! Restock Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Restock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestockRequest {
    /// Units to add to the current stock
    pub quantity: u32,
}

/// Restock Product Handler
#[endpoint(
    tags("products"),
    summary = "Restock Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product with new stock"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another store"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<RestockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let store = depot.store_or_403()?;
    let quantity = json.into_inner().quantity;

    let restocked = state
        .app
        .products
        .restock(store, product.into_inner().into(), quantity)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        product_uuid = %restocked.uuid,
        quantity,
        available = restocked.available,
        "restocked product"
    );

    Ok(Json(restocked.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use venda::{
        catalog::MAX_STOCK,
        inventory::InventoryError,
        principal::{Principal, StoreUuid},
    };
    use venda_app::domain::products::{ProductsServiceError, models::ProductUuid};

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(mocks: Mocks, store: StoreUuid) -> Service {
        mocks.service_as(
            Principal::Store(store),
            Router::with_path("products/{product}/restock").post(handler),
        )
    }

    #[tokio::test]
    async fn test_restock_returns_new_level() -> TestResult {
        let store = StoreUuid::new();
        let uuid = ProductUuid::new();

        let mut product = make_product(uuid, store);

        product.available = 15;

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_restock()
            .once()
            .withf(move |s, p, quantity| *s == store && *p == uuid && *quantity == 5)
            .return_once(move |_, _, _| Ok(product));

        let mut res = TestClient::post(format!("http://example.com/products/{uuid}/restock"))
            .json(&json!({ "quantity": 5 }))
            .send(&make_service(mocks, store))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.available, 15);
        assert!(body.is_available, "restocked product should be available");

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_zero_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_restock()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::InvalidQuantity));

        let res = TestClient::post(format!(
            "http://example.com/products/{}/restock",
            Uuid::now_v7()
        ))
        .json(&json!({ "quantity": 0 }))
        .send(&make_service(mocks, StoreUuid::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_restock_overflow_returns_422() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_restock()
            .once()
            .withf(|_, _, quantity| *quantity == MAX_STOCK)
            .return_once(move |_, _, _| {
                Err(ProductsServiceError::Stock(InventoryError::Overflow(uuid)))
            });

        let mut res = TestClient::post(format!("http://example.com/products/{uuid}/restock"))
            .json(&json!({ "quantity": MAX_STOCK }))
            .send(&make_service(mocks, StoreUuid::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        let body = res.take_string().await?;

        assert!(body.contains("invalid_quantity"), "unexpected body: {body}");

        Ok(())
    }
}

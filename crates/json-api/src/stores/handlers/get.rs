//! Get Store Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

/// Get Store Handler
#[endpoint(
    tags("stores"),
    summary = "Get Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Store"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.principal_or_401()?;

    let store = state
        .app
        .stores
        .get_store(store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use venda::principal::{CustomerUuid, Principal, StoreUuid};
    use venda_app::domain::stores::StoresServiceError;

    use crate::test_helpers::{Mocks, make_store};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service_as(
            Principal::Customer(CustomerUuid::new()),
            Router::with_path("stores/{store}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_store_returns_200() -> TestResult {
        let uuid = StoreUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .stores
            .expect_get_store()
            .once()
            .withf(move |s| *s == uuid)
            .return_once(move |_| Ok(make_store(uuid, "Napoli", true)));

        let mut res = TestClient::get(format!("http://example.com/stores/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: StoreResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Napoli");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_store_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .stores
            .expect_get_store()
            .once()
            .return_once(|_| Err(StoresServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/stores/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

//! Store Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoresResponse {
    /// Every store, by name
    pub stores: Vec<StoreResponse>,
}

/// Store Index Handler
///
/// Lists every store, open or closed, so customers can browse before picking
/// one to order from.
#[endpoint(
    tags("stores"),
    summary = "List Stores",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stores"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.principal_or_401()?;

    let stores = state
        .app
        .stores
        .list_stores()
        .await
        .map_err(into_status_error)?;

    Ok(Json(StoresResponse {
        stores: stores.into_iter().map(Into::into).collect(),
    }))
}

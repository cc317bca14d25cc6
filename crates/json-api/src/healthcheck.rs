//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, `degraded` otherwise
    pub status: String,

    /// `ok` or `unreachable`
    pub database: String,

    /// Crate version serving the request
    pub version: String,
}

/// Healthcheck handler
///
/// Pings the database so load balancers stop routing checkouts to an
/// instance that cannot reach it.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reachable = state.app.health.database_reachable().await;

    if !reachable {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        database: if reachable { "ok" } else { "unreachable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

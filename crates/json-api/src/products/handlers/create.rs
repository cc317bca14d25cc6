//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::products::models::{NewProduct, ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Client-chosen id; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Display name
    pub name: String,

    /// Display description
    #[serde(default)]
    pub description: String,

    /// Price in centavos
    pub price: u64,

    /// Initial stock
    #[serde(default)]
    pub available: u32,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, Into::into),
            name: request.name,
            description: request.description,
            price: request.price,
            available: request.available,
        }
    }
}

/// Create Product Handler
///
/// Lists a new product for the authenticated store.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a store"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(store_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let store = depot.store_or_403()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("store_uuid", tracing::field::display(store));
    span.record("price", request.price);

    let product = state
        .app
        .products
        .create_product(store, request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, "created product");

    Ok(Json(product.into()))
}

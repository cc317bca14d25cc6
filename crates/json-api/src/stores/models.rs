//! Store response body.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::stores::models::Store;

/// Store Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    /// The unique identifier of the store
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Whether the store is taking orders
    pub is_open: bool,

    /// The date and time the store was created
    pub created_at: String,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            uuid: store.uuid.into(),
            name: store.name,
            is_open: store.is_open,
            created_at: store.created_at.to_string(),
        }
    }
}

//! Error rendering shared by every resource.
//!
//! Errors carry a machine-readable kind in `brief` and the error's own
//! message in `detail`. Storage failures are logged here and rendered as a
//! bare 500.

use std::fmt::Display;

use salvo::http::StatusError;
use tracing::error;
use venda::inventory::InventoryError;

pub(crate) fn conflict(kind: &str, error: &impl Display) -> StatusError {
    StatusError::conflict().brief(kind).detail(error.to_string())
}

pub(crate) fn not_found(kind: &str, error: &impl Display) -> StatusError {
    StatusError::not_found().brief(kind).detail(error.to_string())
}

pub(crate) fn unprocessable(kind: &str, error: &impl Display) -> StatusError {
    StatusError::unprocessable_entity()
        .brief(kind)
        .detail(error.to_string())
}

pub(crate) fn forbidden(error: &impl Display) -> StatusError {
    StatusError::forbidden()
        .brief("permission_denied")
        .detail(error.to_string())
}

pub(crate) fn bad_request(error: &impl Display) -> StatusError {
    StatusError::bad_request()
        .brief("invalid_request")
        .detail(error.to_string())
}

pub(crate) fn internal(context: &str, source: &impl Display) -> StatusError {
    error!("{context}: {source}");

    StatusError::internal_server_error()
}

pub(crate) fn stock(error: &InventoryError) -> StatusError {
    match error {
        InventoryError::InsufficientStock { .. } | InventoryError::Untracked(_) => {
            conflict("insufficient_stock", error)
        }
        InventoryError::Overflow(_) => unprocessable("invalid_quantity", error),
    }
}

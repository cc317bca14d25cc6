//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use venda::{
    inventory::InventoryError,
    orders::{OrderError, TransitionError},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("not allowed to act on this order")]
    PermissionDenied,

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    #[error(transparent)]
    Stock(#[from] InventoryError),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<OrderError> for OrdersServiceError {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::PermissionDenied { .. } => Self::PermissionDenied,
            OrderError::InvalidTransition(transition) => Self::InvalidTransition(transition),
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use venda::{checkout::CheckoutError, principal::StoreUuid};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("store {0} is closed")]
    StoreClosed(StoreUuid),

    #[error("could not allocate a unique order code")]
    CodeExhausted,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

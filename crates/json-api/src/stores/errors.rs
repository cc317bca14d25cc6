//! Store Errors

use salvo::http::StatusError;

use venda_app::domain::stores::StoresServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: StoresServiceError) -> StatusError {
    match error {
        StoresServiceError::NotFound => errors::not_found("not_found", &error),
        StoresServiceError::AlreadyExists => errors::conflict("already_exists", &error),
        StoresServiceError::InvalidData => errors::bad_request(&error),
        StoresServiceError::Sql(source) => errors::internal("store storage failed", &source),
    }
}

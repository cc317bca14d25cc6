//! Product Errors

use salvo::http::StatusError;

use venda_app::domain::products::ProductsServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => errors::conflict("already_exists", &error),
        ProductsServiceError::NotFound => errors::not_found("not_found", &error),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => errors::bad_request(&error),
        ProductsServiceError::PermissionDenied => errors::forbidden(&error),
        ProductsServiceError::InvalidQuantity => errors::unprocessable("invalid_quantity", &error),
        ProductsServiceError::InvalidPrice => errors::unprocessable("invalid_price", &error),
        ProductsServiceError::Stock(stock) => errors::stock(&stock),
        ProductsServiceError::Sql(source) => errors::internal("product storage failed", &source),
    }
}

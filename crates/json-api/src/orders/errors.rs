//! Order Errors

use salvo::http::StatusError;

use venda_app::domain::orders::OrdersServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => errors::not_found("not_found", &error),
        OrdersServiceError::PermissionDenied => errors::forbidden(&error),
        OrdersServiceError::InvalidTransition(_) => errors::conflict("invalid_transition", &error),
        OrdersServiceError::Stock(stock) => errors::stock(&stock),
        OrdersServiceError::InvalidData => errors::bad_request(&error),
        OrdersServiceError::Sql(source) => errors::internal("failed to update order", &source),
    }
}

//! Checkout Errors

use salvo::http::StatusError;
use venda::checkout::CheckoutError;

use venda_app::domain::checkout::CheckoutServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::Checkout(checkout) => match &checkout {
            CheckoutError::EmptyCart => errors::unprocessable("empty_cart", &checkout),
            CheckoutError::MissingAddress => errors::unprocessable("missing_address", &checkout),
            CheckoutError::InvalidPaymentMethod => {
                errors::unprocessable("invalid_payment_method", &checkout)
            }
            CheckoutError::Stock(stock) => errors::stock(stock),
            CheckoutError::TotalOutOfRange => errors::unprocessable("invalid_quantity", &checkout),
        },
        CheckoutServiceError::InvalidReference | CheckoutServiceError::InvalidData => {
            errors::bad_request(&error)
        }
        CheckoutServiceError::StoreClosed(_) => errors::conflict("store_closed", &error),
        CheckoutServiceError::CodeExhausted => errors::internal("checkout failed", &error),
        CheckoutServiceError::Sql(source) => errors::internal("checkout failed", &source),
    }
}

//! Cart Errors

use salvo::http::StatusError;
use venda::carts::CartError;

use venda_app::domain::carts::CartsServiceError;

use crate::errors;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound | CartsServiceError::ProductNotFound => {
            errors::not_found("not_found", &error)
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            errors::bad_request(&error)
        }
        CartsServiceError::StoreClosed(_) => errors::conflict("store_closed", &error),
        CartsServiceError::Cart(cart) => cart_status_error(&cart),
        CartsServiceError::Sql(source) => errors::internal("failed to update cart", &source),
    }
}

fn cart_status_error(error: &CartError) -> StatusError {
    match error {
        CartError::InvalidQuantity => errors::unprocessable("invalid_quantity", error),
        CartError::ProductInactive(_) => errors::not_found("not_found", error),
        CartError::CrossStore { .. } => errors::conflict("cross_store_cart", error),
        CartError::ItemNotFound(_) => errors::not_found("item_not_found", error),
        CartError::Stock(stock) => errors::stock(stock),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use venda::{catalog::ProductUuid, principal::StoreUuid};

    use super::*;

    #[test]
    fn cross_store_is_a_conflict() {
        let error = into_status_error(CartsServiceError::Cart(CartError::CrossStore {
            product: ProductUuid::new(),
            product_store: StoreUuid::new(),
            cart_store: StoreUuid::new(),
        }));

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "cross_store_cart");
    }

    #[test]
    fn closed_store_is_a_conflict() {
        let error = into_status_error(CartsServiceError::StoreClosed(StoreUuid::new()));

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "store_closed");
    }

    #[test]
    fn missing_line_is_item_not_found() {
        let error = into_status_error(CartsServiceError::Cart(CartError::ItemNotFound(
            ProductUuid::new(),
        )));

        assert_eq!(error.code, StatusCode::NOT_FOUND);
        assert_eq!(error.brief, "item_not_found");
    }
}

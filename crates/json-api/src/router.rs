//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, customers, orders, products, stores};

/// Every route that requires a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .delete(carts::handlers::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::handlers::create::handler))
        .push(
            Router::with_path("addresses")
                .get(customers::addresses::handlers::index::handler)
                .post(customers::addresses::handlers::create::handler)
                .push(
                    Router::with_path("{address}")
                        .delete(customers::addresses::handlers::delete::handler),
                ),
        )
        .push(
            Router::with_path("payment-methods")
                .get(customers::payment_methods::handlers::index::handler)
                .post(customers::payment_methods::handlers::create::handler)
                .push(
                    Router::with_path("{method}")
                        .delete(customers::payment_methods::handlers::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::handlers::get::handler)
                        .push(
                            Router::with_path("status")
                                .put(orders::handlers::update_status::handler),
                        )
                        .push(Router::with_path("cancel").post(orders::handlers::cancel::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .post(products::handlers::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::handlers::get::handler)
                        .put(products::handlers::update::handler)
                        .push(
                            Router::with_path("restock").post(products::handlers::restock::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("stores")
                .get(stores::handlers::index::handler)
                .push(Router::with_path("{store}").get(stores::handlers::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::Service,
        test::TestClient,
    };
    use testresult::TestResult;

    use venda::principal::{Principal, StoreUuid};

    use crate::test_helpers::{Mocks, make_order};

    use super::*;

    #[tokio::test]
    async fn test_routes_require_a_token() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(Mocks::default().into_state()))
                .push(app_router()),
        );

        for path in [
            "cart",
            "orders",
            "products",
            "stores",
            "addresses",
            "payment-methods",
        ] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .send(&service)
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "{path} answered without a token"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticated_request_reaches_handler() -> TestResult {
        let store = StoreUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(move |_| Ok(Principal::Store(store)));

        mocks.orders.expect_list_orders().once().return_once(move |_| {
            Ok(vec![make_order(
                Default::default(),
                Default::default(),
                store,
                venda::orders::OrderStatus::Pending,
            )])
        });

        let service = Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        );

        let res = TestClient::get("http://example.com/orders")
            .add_header(AUTHORIZATION, "Bearer vnd_abc", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}

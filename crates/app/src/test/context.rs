//! Test context for service-level integration tests.

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        carts::PgCartsService,
        checkout::PgCheckoutService,
        customers::{
            CustomersService, CustomersServiceError, PgCustomersService,
            models::{CustomerUuid, NewCustomer},
        },
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService, ProductsServiceError,
            models::{NewProduct, Product},
        },
        stores::{
            PgStoresService, StoresService, StoresServiceError,
            models::{NewStore, StoreUuid},
        },
    },
    health::PgHealthService,
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub stores: PgStoresService,
    pub customers: PgCustomersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
    pub health: PgHealthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            stores: PgStoresService::new(db.clone()),
            customers: PgCustomersService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            auth: PgAuthService::new(db.clone()),
            health: PgHealthService::new(db),
            db: test_db,
        }
    }

    pub async fn create_store(&self, name: &str) -> Result<StoreUuid, StoresServiceError> {
        let store = self
            .stores
            .create_store(NewStore {
                uuid: StoreUuid::new(),
                name: name.to_string(),
            })
            .await?;

        Ok(store.uuid)
    }

    pub async fn create_customer(
        &self,
        name: &str,
    ) -> Result<CustomerUuid, CustomersServiceError> {
        let customer = self
            .customers
            .create_customer(NewCustomer {
                uuid: CustomerUuid::new(),
                name: name.to_string(),
            })
            .await?;

        Ok(customer.uuid)
    }

    /// Create an active product with the given price and stock.
    pub async fn create_product(
        &self,
        store: StoreUuid,
        price: u64,
        available: u32,
    ) -> Result<Product, ProductsServiceError> {
        self.products
            .create_product(
                store,
                NewProduct {
                    uuid: Default::default(),
                    name: "Margherita".to_string(),
                    description: "Tomato, mozzarella, basil".to_string(),
                    price,
                    available,
                },
            )
            .await
    }
}

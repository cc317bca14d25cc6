//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        stores::{PgStoresService, StoresService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub stores: Arc<dyn StoresService>,
    pub customers: Arc<dyn CustomersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        settings: PoolSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, settings)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(&Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            stores: Arc::new(PgStoresService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone())),
            health: Arc::new(PgHealthService::new(db.clone())),
        }
    }
}

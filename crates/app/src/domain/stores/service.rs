//! Stores service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stores::{
        errors::StoresServiceError,
        models::{NewStore, Store, StoreUuid},
        repository::PgStoresRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn create_store(&self, store: NewStore) -> Result<Store, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_store(&self, store: StoreUuid) -> Result<Store, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self.repository.get_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(store)
    }

    async fn list_stores(&self) -> Result<Vec<Store>, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let stores = self.repository.list_stores(&mut tx).await?;

        tx.commit().await?;

        Ok(stores)
    }

    async fn set_open(&self, store: StoreUuid, is_open: bool) -> Result<Store, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self
            .repository
            .set_store_open(&mut tx, store, is_open)
            .await?;

        tx.commit().await?;

        Ok(store)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Register a new store.
    async fn create_store(&self, store: NewStore) -> Result<Store, StoresServiceError>;

    /// Retrieve a single store.
    async fn get_store(&self, store: StoreUuid) -> Result<Store, StoresServiceError>;

    /// Every store, open or closed, by name.
    async fn list_stores(&self) -> Result<Vec<Store>, StoresServiceError>;

    /// Open or close a store. A closed store takes no new cart items or orders.
    async fn set_open(&self, store: StoreUuid, is_open: bool) -> Result<Store, StoresServiceError>;
}

//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use venda::catalog::{MAX_AMOUNT, MAX_STOCK};

use crate::{
    database::Db,
    domain::{
        inventory::PgInventoryRepository,
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductFilter, ProductUpdate, ProductUuid, StoreUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    inventory: PgInventoryRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            inventory: PgInventoryRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let filter = ProductFilter {
            search: filter
                .search
                .map(|search| search.trim().to_string())
                .filter(|search| !search.is_empty()),
            ..filter
        };

        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        store: StoreUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        check_price(product.price)?;

        if product.available > MAX_STOCK {
            return Err(ProductsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, store, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if let Some(price) = update.price {
            check_price(price)?;
        }

        let mut tx = self.db.begin().await?;

        let owner = self.repository.get_product_store(&mut tx, product).await?;

        if owner != store {
            return Err(ProductsServiceError::PermissionDenied);
        }

        let updated = self
            .repository
            .update_product(&mut tx, store, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn restock(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Product, ProductsServiceError> {
        if quantity == 0 {
            return Err(ProductsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let mut locked = self.inventory.lock(&mut tx, &[product]).await?;

        let owner = locked
            .products
            .get(&product)
            .map(|locked| locked.store)
            .ok_or(ProductsServiceError::NotFound)?;

        if owner != store {
            return Err(ProductsServiceError::PermissionDenied);
        }

        locked.ledger.release(product, quantity)?;

        self.inventory.write_changes(&mut tx, &locked.ledger).await?;

        let restocked = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(%product, quantity, available = restocked.available, "product.restocked");

        Ok(restocked)
    }
}

fn check_price(price: u64) -> Result<(), ProductsServiceError> {
    if price > MAX_AMOUNT {
        return Err(ProductsServiceError::InvalidPrice);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Active products by name, optionally limited to one store or to a
    /// search term. A blank search term matches everything.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product for the given store.
    async fn create_product(
        &self,
        store: StoreUuid,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Updates one of the store's products. Existing orders keep their prices.
    async fn update_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Adds stock to one of the store's products.
    async fn restock(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Product, ProductsServiceError>;
}

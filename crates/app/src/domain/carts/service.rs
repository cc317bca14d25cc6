//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;
use venda::carts::{Cart as CartAggregate, CartError};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CustomerUuid, NewCartItem, ProductUuid},
            repositories::{CartRecord, PgCartItemsRepository, PgCartsRepository, StoredCartLine},
        },
        stores::PgStoresRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    stores_repository: PgStoresRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            stores_repository: PgStoresRepository::new(),
        }
    }

    async fn load(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<(CartRecord, Vec<StoredCartLine>), CartsServiceError> {
        let record = self.carts_repository.ensure_cart(tx, customer).await?;

        let lines = self
            .items_repository
            .get_cart_items(tx, record.uuid)
            .await?;

        Ok((record, lines))
    }

    async fn reload_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &CartRecord,
        product: ProductUuid,
    ) -> Result<CartItem, CartsServiceError> {
        self.carts_repository.touch_cart(tx, record.uuid).await?;

        self.items_repository
            .get_cart_items(tx, record.uuid)
            .await?
            .iter()
            .find(|stored| stored.line.product.uuid == product)
            .map(cart_item)
            .ok_or(CartsServiceError::Cart(CartError::ItemNotFound(product)))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines) = self.load(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(cart(record, &lines))
    }

    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines) = self.load(&mut tx, customer).await?;

        let (product, _name) = self
            .items_repository
            .get_catalog_product(&mut tx, item.product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let store = self
            .stores_repository
            .get_store(&mut tx, product.store)
            .await?;

        if !store.is_open {
            return Err(CartsServiceError::StoreClosed(store.uuid));
        }

        let mut aggregate = aggregate(&lines);

        let line = aggregate
            .add_item(product, item.quantity, item.fulfillment_date)?
            .clone();

        self.items_repository
            .upsert_cart_item(&mut tx, record.uuid, &line)
            .await?;

        let added = self.reload_item(&mut tx, &record, item.product).await?;

        tx.commit().await?;

        debug!(
            cart = %record.uuid,
            product = %item.product,
            quantity = added.quantity,
            "cart.item_added"
        );

        Ok(added)
    }

    async fn set_quantity(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines) = self.load(&mut tx, customer).await?;

        let mut aggregate = aggregate(&lines);

        let line = aggregate.set_quantity(product, quantity)?.clone();

        self.items_repository
            .upsert_cart_item(&mut tx, record.uuid, &line)
            .await?;

        let updated = self.reload_item(&mut tx, &record, product).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.carts_repository.ensure_cart(&mut tx, customer).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, record.uuid, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartError::ItemNotFound(product).into());
        }

        self.carts_repository.touch_cart(&mut tx, record.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, customer: CustomerUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.carts_repository.ensure_cart(&mut tx, customer).await?;

        self.items_repository
            .clear_cart_items(&mut tx, record.uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's cart with live totals, created on first access.
    async fn get_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError>;

    /// Add units of a product, merging with an existing line.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Overwrite the quantity of an existing line.
    async fn set_quantity(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Remove the line for a product.
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line. Clearing an empty cart succeeds.
    async fn clear(&self, customer: CustomerUuid) -> Result<(), CartsServiceError>;
}

fn aggregate(lines: &[StoredCartLine]) -> CartAggregate {
    CartAggregate::with_lines(lines.iter().map(|stored| stored.line.clone()).collect())
}

fn cart_item(stored: &StoredCartLine) -> CartItem {
    CartItem {
        uuid: stored.uuid,
        product: stored.line.product.uuid,
        product_name: stored.product_name.clone(),
        unit_price: stored.line.product.price,
        quantity: stored.line.quantity,
        subtotal: stored.line.subtotal(),
        fulfillment_date: stored.line.fulfillment_date,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

fn cart(record: CartRecord, lines: &[StoredCartLine]) -> Cart {
    let aggregate = aggregate(lines);

    Cart {
        uuid: record.uuid,
        customer: record.customer,
        store: aggregate.store(),
        total: aggregate.total(),
        items: lines.iter().map(cart_item).collect(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

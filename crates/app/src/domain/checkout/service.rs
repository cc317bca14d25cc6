//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use venda::{
    carts::{Cart as CartAggregate, CartLine},
    catalog::ProductUuid,
    checkout::prepare_order,
    orders::{OrderCode, OrderUuid},
    principal::CustomerUuid,
};

use crate::{
    database::Db,
    domain::{
        carts::{PgCartItemsRepository, PgCartsRepository},
        checkout::{errors::CheckoutServiceError, models::CheckoutRequest},
        customers::repository::PgCustomersRepository,
        inventory::PgInventoryRepository,
        orders::{models::Order, repository::PgOrdersRepository},
        stores::PgStoresRepository,
    },
};

/// Attempts at drawing an order code that is not yet taken.
const ORDER_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartsRepository,
    cart_items: PgCartItemsRepository,
    customers: PgCustomersRepository,
    inventory: PgInventoryRepository,
    orders: PgOrdersRepository,
    stores: PgStoresRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            customers: PgCustomersRepository::new(),
            inventory: PgInventoryRepository::new(),
            orders: PgOrdersRepository::new(),
            stores: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn checkout(
        &self,
        customer: CustomerUuid,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts.ensure_cart(&mut tx, customer).await?;

        let stored = self.cart_items.get_cart_items(&mut tx, cart.uuid).await?;

        let address = self
            .customers
            .find_usable_address(&mut tx, customer, request.address)
            .await?;

        let payment_method = self
            .customers
            .find_payment_method(&mut tx, request.payment_method)
            .await?;

        let mut products: Vec<ProductUuid> = stored
            .iter()
            .map(|stored| stored.line.product.uuid)
            .collect();
        products.sort();

        let mut locked = self.inventory.lock(&mut tx, &products).await?;

        // Prices and stock come from the locked rows, not the cart read.
        let lines = stored
            .into_iter()
            .map(|stored| CartLine {
                product: locked
                    .products
                    .get(&stored.line.product.uuid)
                    .cloned()
                    .unwrap_or(stored.line.product),
                ..stored.line
            })
            .collect();

        let draft = prepare_order(
            customer,
            &CartAggregate::with_lines(lines),
            address,
            payment_method,
            &mut locked.ledger,
        )?;

        if !self.stores.get_store(&mut tx, draft.store).await?.is_open {
            return Err(CheckoutServiceError::StoreClosed(draft.store));
        }

        let order = OrderUuid::new();
        let mut record = None;

        for _ in 0..ORDER_CODE_ATTEMPTS {
            let code = OrderCode::generate();

            record = self.orders.create_order(&mut tx, order, &code, &draft).await?;

            if record.is_some() {
                break;
            }

            warn!(%code, "order.code_collision");
        }

        let record = record.ok_or(CheckoutServiceError::CodeExhausted)?;

        let mut items = Vec::with_capacity(draft.items.len());

        for item in &draft.items {
            items.push(self.orders.create_order_item(&mut tx, order, item).await?);
        }

        self.inventory.write_changes(&mut tx, &locked.ledger).await?;

        self.cart_items.clear_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(
            %order,
            code = %record.code,
            %customer,
            store = %record.store,
            total = record.total,
            items = items.len(),
            "order.created"
        );

        Ok(record.with_items(items))
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the customer's cart into a pending order.
    ///
    /// Either the order is created, stock is reserved and the cart is
    /// emptied, or nothing changes.
    async fn checkout(
        &self,
        customer: CustomerUuid,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutServiceError>;
}

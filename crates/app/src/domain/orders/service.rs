//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use venda::{
    catalog::ProductUuid,
    orders::{StatusChange, plan_transition},
    principal::{Principal, StoreUuid},
};

use crate::{
    database::Db,
    domain::{
        inventory::PgInventoryRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    inventory: PgInventoryRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            inventory: PgInventoryRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, principal: Principal) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = match principal {
            Principal::Customer(customer) => {
                self.repository
                    .list_customer_orders(&mut tx, customer)
                    .await?
            }
            Principal::Store(store) => {
                self.repository
                    .list_store_active_orders(&mut tx, store)
                    .await?
            }
        };

        let orders = self.repository.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_store_history(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .list_store_order_history(&mut tx, store)
            .await?;

        let orders = self.repository.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        if !record.parties().involves(principal) {
            return Err(OrdersServiceError::PermissionDenied);
        }

        let mut orders = self.repository.with_items(&mut tx, vec![record]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn update_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.lock_order(&mut tx, order).await?;

        let change = plan_transition(principal, record.parties(), record.status, status)?;

        if change == StatusChange::Cancel {
            let items = self
                .repository
                .get_order_items(&mut tx, &[order])
                .await?
                .remove(&order)
                .unwrap_or_default();

            let mut products: Vec<ProductUuid> = items.iter().map(|item| item.product).collect();
            products.sort();
            products.dedup();

            let mut locked = self.inventory.lock(&mut tx, &products).await?;

            for item in &items {
                locked.ledger.release(item.product, item.quantity)?;
            }

            self.inventory.write_changes(&mut tx, &locked.ledger).await?;
        }

        let updated = self
            .repository
            .update_order_status(&mut tx, order, change.status())
            .await?;

        let mut orders = self.repository.with_items(&mut tx, vec![updated]).await?;

        tx.commit().await?;

        info!(
            %order,
            from = %record.status,
            to = %change.status(),
            actor = principal.role(),
            "order.status_changed"
        );

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// A customer's orders newest first, or a store's active orders oldest
    /// first.
    async fn list_orders(&self, principal: Principal) -> Result<Vec<Order>, OrdersServiceError>;

    /// A store's delivered and cancelled orders, most recently closed first.
    async fn list_store_history(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// A single order, visible to its customer and its store.
    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Move an order to `status`. Cancelling releases the order's stock.
    async fn update_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel an order on behalf of its customer.
    async fn cancel(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        self.update_status(principal, order, OrderStatus::Cancelled)
            .await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::ProductsService,
        test::{TestContext, helpers::Shopper},
    };

    use super::*;

    #[tokio::test]
    async fn store_moves_order_through_happy_path() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 1).await?;
        let store = Principal::Store(order.store);

        for status in [
            OrderStatus::Preparing,
            OrderStatus::EnRoute,
            OrderStatus::Delivered,
        ] {
            let updated = ctx.orders.update_status(store, order.uuid, status).await?;

            assert_eq!(updated.status, status);
        }

        Ok(())
    }

    #[tokio::test]
    async fn skipping_a_step_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 1).await?;

        let result = ctx
            .orders
            .update_status(
                Principal::Store(order.store),
                order.uuid,
                OrderStatus::Delivered,
            )
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition(transition))
                    if transition.from == OrderStatus::Pending
                        && transition.to == OrderStatus::Delivered
            ),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customer_cancel_restores_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 2).await?;
        let product = order.items.first().map(|item| item.product).unwrap_or_default();

        assert_eq!(ctx.products.get_product(product).await?.available, 3);

        let cancelled = ctx
            .orders
            .cancel(Principal::Customer(shopper.customer), order.uuid)
            .await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.total, order.total);
        assert_eq!(ctx.products.get_product(product).await?.available, 5);

        Ok(())
    }

    #[tokio::test]
    async fn cancelling_last_unit_makes_product_available_again() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 1, 1).await?;
        let product = order.items.first().map(|item| item.product).unwrap_or_default();

        assert!(!ctx.products.get_product(product).await?.is_available);

        ctx.orders
            .cancel(Principal::Customer(shopper.customer), order.uuid)
            .await?;

        let restored = ctx.products.get_product(product).await?;

        assert_eq!(restored.available, 1);
        assert!(restored.is_available);

        Ok(())
    }

    #[tokio::test]
    async fn en_route_order_cannot_be_cancelled() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 1).await?;
        let store = Principal::Store(order.store);

        ctx.orders
            .update_status(store, order.uuid, OrderStatus::Preparing)
            .await?;
        ctx.orders
            .update_status(store, order.uuid, OrderStatus::EnRoute)
            .await?;

        let result = ctx
            .orders
            .cancel(Principal::Customer(shopper.customer), order.uuid)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition(_))),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delivered_order_accepts_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 1).await?;
        let store = Principal::Store(order.store);

        for status in [
            OrderStatus::Preparing,
            OrderStatus::EnRoute,
            OrderStatus::Delivered,
        ] {
            ctx.orders.update_status(store, order.uuid, status).await?;
        }

        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::EnRoute,
            OrderStatus::Delivered,
        ] {
            let result = ctx.orders.update_status(store, order.uuid, status).await;

            assert!(
                matches!(result, Err(OrdersServiceError::InvalidTransition(_))),
                "delivered order moved to {status}: {result:?}"
            );
        }

        let cancel = ctx
            .orders
            .cancel(Principal::Customer(shopper.customer), order.uuid)
            .await;

        assert!(matches!(
            cancel,
            Err(OrdersServiceError::InvalidTransition(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_principals_are_denied() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 1).await?;
        let other_store = ctx.create_store("Elsewhere").await?;

        let customer_advances = ctx
            .orders
            .update_status(
                Principal::Customer(shopper.customer),
                order.uuid,
                OrderStatus::Preparing,
            )
            .await;
        let store_cancels = ctx
            .orders
            .cancel(Principal::Store(order.store), order.uuid)
            .await;
        let other_store_advances = ctx
            .orders
            .update_status(
                Principal::Store(other_store),
                order.uuid,
                OrderStatus::Preparing,
            )
            .await;
        let other_store_reads = ctx
            .orders
            .get_order(Principal::Store(other_store), order.uuid)
            .await;

        for result in [
            customer_advances,
            store_cancels,
            other_store_advances,
            other_store_reads,
        ] {
            assert!(
                matches!(result, Err(OrdersServiceError::PermissionDenied)),
                "expected PermissionDenied, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;

        let result = ctx
            .orders
            .update_status(
                Principal::Customer(shopper.customer),
                OrderUuid::new(),
                OrderStatus::Cancelled,
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customer_lists_newest_first_and_store_lists_active_oldest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;

        let first = shopper.order(&ctx, 10_00, 5, 1).await?;
        let second = shopper.order_from(&ctx, first.store, 12_00, 5, 1).await?;
        let third = shopper.order_from(&ctx, first.store, 14_00, 5, 1).await?;

        ctx.orders
            .cancel(Principal::Customer(shopper.customer), second.uuid)
            .await?;

        let customer_view: Vec<_> = ctx
            .orders
            .list_orders(Principal::Customer(shopper.customer))
            .await?
            .into_iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(customer_view, vec![third.uuid, second.uuid, first.uuid]);

        let store_view: Vec<_> = ctx
            .orders
            .list_orders(Principal::Store(first.store))
            .await?
            .into_iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(store_view, vec![first.uuid, third.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn store_history_holds_closed_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;

        let delivered = shopper.order(&ctx, 10_00, 5, 1).await?;
        let store = delivered.store;
        let cancelled = shopper.order_from(&ctx, store, 12_00, 5, 1).await?;
        let open = shopper.order_from(&ctx, store, 14_00, 5, 1).await?;

        for status in [
            OrderStatus::Preparing,
            OrderStatus::EnRoute,
            OrderStatus::Delivered,
        ] {
            ctx.orders
                .update_status(Principal::Store(store), delivered.uuid, status)
                .await?;
        }

        ctx.orders
            .cancel(Principal::Customer(shopper.customer), cancelled.uuid)
            .await?;

        let history: Vec<_> = ctx
            .orders
            .list_store_history(store)
            .await?
            .into_iter()
            .map(|order| (order.uuid, order.status))
            .collect();

        assert_eq!(
            history,
            vec![
                (cancelled.uuid, OrderStatus::Cancelled),
                (delivered.uuid, OrderStatus::Delivered),
            ]
        );
        assert!(
            ctx.orders
                .list_store_history(StoreUuid::new())
                .await?
                .is_empty()
        );
        assert!(history.iter().all(|(uuid, _)| *uuid != open.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn get_order_returns_items_to_both_parties() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = Shopper::ready(&ctx).await?;
        let order = shopper.order(&ctx, 10_00, 5, 3).await?;

        let as_customer = ctx
            .orders
            .get_order(Principal::Customer(shopper.customer), order.uuid)
            .await?;
        let as_store = ctx
            .orders
            .get_order(Principal::Store(order.store), order.uuid)
            .await?;

        assert_eq!(as_customer, as_store);
        assert_eq!(as_customer.items.len(), 1);
        assert_eq!(
            as_customer.items.first().map(|item| item.subtotal()),
            Some(30_00)
        );

        Ok(())
    }
}

//! Orders Repository

use std::collections::HashMap;

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;
use venda::{
    checkout::{OrderDraft, OrderDraftItem},
    orders::OrderParties,
};

use crate::{
    database::{amount_param, quantity_param, try_get_amount, try_get_quantity},
    domain::orders::models::{
        AddressUuid, CustomerUuid, Order, OrderCode, OrderItem, OrderItemUuid, OrderStatus,
        OrderUuid, PaymentMethodUuid, ProductUuid, StoreUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("sql/list_customer_orders.sql");
const LIST_STORE_ACTIVE_ORDERS_SQL: &str = include_str!("sql/list_store_active_orders.sql");
const LIST_STORE_ORDER_HISTORY_SQL: &str = include_str!("sql/list_store_order_history.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");

/// Order header row, without items.
#[derive(Debug, Clone)]
pub(crate) struct OrderRecord {
    pub uuid: OrderUuid,
    pub code: OrderCode,
    pub customer: CustomerUuid,
    pub store: StoreUuid,
    pub payment_method: PaymentMethodUuid,
    pub address: AddressUuid,
    pub status: OrderStatus,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    pub(crate) fn parties(&self) -> OrderParties {
        OrderParties {
            customer: self.customer,
            store: self.store,
        }
    }

    pub(crate) fn with_items(self, items: Vec<OrderItem>) -> Order {
        Order {
            uuid: self.uuid,
            code: self.code,
            customer: self.customer,
            store: self.store,
            payment_method: self.payment_method,
            address: self.address,
            status: self.status,
            total: self.total,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header, or nothing when `code` is already taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        code: &OrderCode,
        draft: &OrderDraft,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(code.as_str())
            .bind(draft.customer.into_uuid())
            .bind(draft.store.into_uuid())
            .bind(draft.payment_method.into_uuid())
            .bind(draft.address.into_uuid())
            .bind(amount_param(draft.total, "total")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &OrderDraftItem,
    ) -> Result<OrderItem, sqlx::Error> {
        let uuid = OrderItemUuid::new();

        query(CREATE_ORDER_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.product.into_uuid())
            .bind(quantity_param(item.quantity, "quantity")?)
            .bind(amount_param(item.price, "price")?)
            .bind(item.fulfillment_date.map(SqlxDate::from))
            .execute(&mut **tx)
            .await?;

        Ok(OrderItem {
            uuid,
            product: item.product,
            quantity: item.quantity,
            price: item.price,
            fulfillment_date: item.fulfillment_date,
        })
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order header and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_store_active_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let statuses: Vec<&str> = OrderStatus::ACTIVE.iter().map(|s| s.as_str()).collect();

        query_as::<Postgres, OrderRecord>(LIST_STORE_ACTIVE_ORDERS_SQL)
            .bind(store.into_uuid())
            .bind(statuses)
            .fetch_all(&mut **tx)
            .await
    }

    /// Orders that left the kitchen queue, most recently closed first.
    pub(crate) async fn list_store_order_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let statuses: Vec<&str> = OrderStatus::ACTIVE.iter().map(|s| s.as_str()).collect();

        query_as::<Postgres, OrderRecord>(LIST_STORE_ORDER_HISTORY_SQL)
            .bind(store.into_uuid())
            .bind(statuses)
            .fetch_all(&mut **tx)
            .await
    }

    /// Items of the given orders, grouped by order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<OrderItem>>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: HashMap<OrderUuid, Vec<OrderItem>> = HashMap::new();

        for row in &rows {
            let order = OrderUuid::from_uuid(row.try_get("order_uuid")?);

            items.entry(order).or_default().push(order_item_from_row(row)?);
        }

        Ok(items)
    }

    /// Attach items to each header, keeping the header order.
    pub(crate) async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: Vec<OrderRecord>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let uuids: Vec<OrderUuid> = records.iter().map(|record| record.uuid).collect();

        let mut items = self.get_order_items(tx, &uuids).await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let order_items = items.remove(&record.uuid).unwrap_or_default();

                record.with_items(order_items)
            })
            .collect())
    }
}

fn order_item_from_row(row: &PgRow) -> Result<OrderItem, sqlx::Error> {
    Ok(OrderItem {
        uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
        product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        quantity: try_get_quantity(row, "quantity")?,
        price: try_get_amount(row, "price")?,
        fulfillment_date: row
            .try_get::<Option<SqlxDate>, _>("fulfillment_date")?
            .map(SqlxDate::to_jiff),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            code: OrderCode::from_stored(row.try_get("code")?),
            customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            payment_method: PaymentMethodUuid::from_uuid(row.try_get("payment_method_uuid")?),
            address: AddressUuid::from_uuid(row.try_get("address_uuid")?),
            status,
            total: try_get_amount(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

//! Cart Items Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};
use venda::{carts::CartLine, catalog::CatalogProduct};

use crate::{
    database::{quantity_param, try_get_quantity},
    domain::{
        carts::models::{CartItemUuid, CartUuid, ProductUuid},
        inventory::catalog_product_from_row,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const GET_CATALOG_PRODUCT_SQL: &str = include_str!("../sql/get_catalog_product.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

/// A cart line joined with the current state of its product.
#[derive(Debug, Clone)]
pub(crate) struct StoredCartLine {
    pub uuid: CartItemUuid,
    pub product_name: String,
    pub line: CartLine,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<StoredCartLine>, sqlx::Error> {
        let rows = query(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter().map(stored_line_from_row).collect()
    }

    /// The product with its current price and stock, if it exists.
    pub(crate) async fn get_catalog_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<(CatalogProduct, String)>, sqlx::Error> {
        let row = query(GET_CATALOG_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| Ok((catalog_product_from_row(&row)?, row.try_get("name")?)))
            .transpose()
    }

    /// Write a line's final quantity and date, inserting it when new.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: &CartLine,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(line.product.uuid.into_uuid())
            .bind(quantity_param(line.quantity, "quantity")?)
            .bind(line.fulfillment_date.map(SqlxDate::from))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn stored_line_from_row(row: &PgRow) -> Result<StoredCartLine, sqlx::Error> {
    Ok(StoredCartLine {
        uuid: CartItemUuid::from_uuid(row.try_get("item_uuid")?),
        product_name: row.try_get("name")?,
        line: CartLine {
            product: catalog_product_from_row(row)?,
            quantity: try_get_quantity(row, "quantity")?,
            fulfillment_date: row
                .try_get::<Option<SqlxDate>, _>("fulfillment_date")?
                .map(SqlxDate::to_jiff),
        },
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}

//! Inventory Repository

use std::collections::BTreeMap;

use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};
use tracing::debug;
use uuid::Uuid;
use venda::{
    catalog::{CatalogProduct, ProductUuid},
    inventory::InventoryLedger,
    principal::StoreUuid,
};

use crate::database::{quantity_param, try_get_amount, try_get_quantity};

const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const UPDATE_STOCK_SQL: &str = include_str!("sql/update_stock.sql");

/// Products read under a row lock, with a ledger over their stock.
#[derive(Debug)]
pub(crate) struct LockedStock {
    pub products: BTreeMap<ProductUuid, CatalogProduct>,
    pub ledger: InventoryLedger,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the given product rows in uuid order and load their stock.
    ///
    /// Products that do not exist are absent from the result.
    pub(crate) async fn lock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<LockedStock, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

        let rows = query(LOCK_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let products = rows
            .iter()
            .map(|row| catalog_product_from_row(row).map(|product| (product.uuid, product)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let ledger = InventoryLedger::from_products(products.values());

        Ok(LockedStock { products, ledger })
    }

    /// Persist every level the ledger changed.
    pub(crate) async fn write_changes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ledger: &InventoryLedger,
    ) -> Result<(), sqlx::Error> {
        for level in ledger.changed() {
            debug!(
                product = %level.product,
                available = level.available,
                is_available = level.is_available,
                "stock.updated"
            );

            query(UPDATE_STOCK_SQL)
                .bind(level.product.into_uuid())
                .bind(quantity_param(level.available, "available")?)
                .bind(level.is_available)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

/// Read the stock-relevant columns of a product row.
pub(crate) fn catalog_product_from_row(row: &PgRow) -> Result<CatalogProduct, sqlx::Error> {
    Ok(CatalogProduct {
        uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
        store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
        price: try_get_amount(row, "price")?,
        available: try_get_quantity(row, "available")?,
        is_available: row.try_get("is_available")?,
        active: row.try_get("active")?,
    })
}

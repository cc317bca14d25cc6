//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::stores::models::{NewStore, Store, StoreUuid};

const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const LIST_STORES_SQL: &str = include_str!("sql/list_stores.sql");
const SET_STORE_OPEN_SQL: &str = include_str!("sql/set_store_open.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<Store, sqlx::Error> {
        query_as::<Postgres, Store>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(store.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Store, sqlx::Error> {
        query_as::<Postgres, Store>(GET_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Store>, sqlx::Error> {
        query_as::<Postgres, Store>(LIST_STORES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_store_open(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        is_open: bool,
    ) -> Result<Store, sqlx::Error> {
        query_as::<Postgres, Store>(SET_STORE_OPEN_SQL)
            .bind(store.into_uuid())
            .bind(is_open)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Store {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            is_open: row.try_get("is_open")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

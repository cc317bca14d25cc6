//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{PgPool, Row, postgres::PgRow, query};
use uuid::Uuid;
use venda::principal::{CustomerUuid, Principal, StoreUuid};

use crate::auth::models::{ApiTokenMetadata, ApiTokenUuid};

const FIND_TOKEN_BY_HASH_SQL: &str = include_str!("sql/find_token_by_hash.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active token whose digest is `hash`.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails or the row has no owner.
    pub async fn find_token_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query(FIND_TOKEN_BY_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| token_from_row(&row))
            .transpose()
    }

    /// # Errors
    ///
    /// Returns an error when the owner does not exist or the insert fails.
    pub async fn create_api_token(
        &self,
        uuid: ApiTokenUuid,
        hash: &str,
        principal: Principal,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        let row = query(CREATE_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .bind(hash)
            .bind(principal.customer().map(CustomerUuid::into_uuid))
            .bind(principal.store().map(StoreUuid::into_uuid))
            .fetch_one(&self.pool)
            .await?;

        token_from_row(&row)
    }

    /// Tokens issued for `principal`, newest first, revoked ones included.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn list_api_tokens(
        &self,
        principal: Principal,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query(LIST_API_TOKENS_SQL)
            .bind(principal.customer().map(CustomerUuid::into_uuid))
            .bind(principal.store().map(StoreUuid::into_uuid))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(token_from_row)
            .collect()
    }

    /// Revoke an active token; `None` when it was unknown or already revoked.
    ///
    /// # Errors
    ///
    /// Returns an error when the update fails.
    pub async fn revoke_api_token(
        &self,
        uuid: ApiTokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query(REVOKE_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(|row| token_from_row(&row))
            .transpose()
    }

    /// # Errors
    ///
    /// Returns an error when the update fails.
    pub async fn touch_last_used(&self, uuid: ApiTokenUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn token_from_row(row: &PgRow) -> Result<ApiTokenMetadata, sqlx::Error> {
    let customer: Option<Uuid> = row.try_get("customer_uuid")?;
    let store: Option<Uuid> = row.try_get("store_uuid")?;

    let principal = match (customer, store) {
        (Some(customer), None) => Principal::Customer(CustomerUuid::from_uuid(customer)),
        (None, Some(store)) => Principal::Store(StoreUuid::from_uuid(store)),
        _ => {
            return Err(sqlx::Error::ColumnDecode {
                index: "customer_uuid".to_string(),
                source: "token must belong to exactly one customer or store".into(),
            });
        }
    };

    Ok(ApiTokenMetadata {
        uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
        principal,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        last_used_at: row
            .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
            .map(SqlxTimestamp::to_jiff),
        revoked_at: row
            .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
            .map(SqlxTimestamp::to_jiff),
    })
}


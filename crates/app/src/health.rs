//! Readiness of the backing services.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::database::Db;

#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn database_reachable(&self) -> bool {
        match self.db.ping().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "database ping failed");

                false
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Whether the database answers a trivial query.
    async fn database_reachable(&self) -> bool;
}

//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};
use venda::principal::Principal;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenUuid, AuthServiceError, IssuedApiToken, generate_api_token,
        hash_api_token, is_well_formed, repository::PgAuthRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
        }
    }

    /// Issue a new API token acting for `principal`.
    ///
    /// # Errors
    ///
    /// Returns an error when the customer or store does not exist or the
    /// insert fails.
    pub async fn issue_api_token(
        &self,
        principal: Principal,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = generate_api_token();

        let metadata = self
            .repository
            .create_api_token(ApiTokenUuid::new(), &hash_api_token(&token), principal)
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens issued for `principal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        principal: Principal,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(principal).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token).await?.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        if !is_well_formed(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        let token = self
            .repository
            .find_token_by_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort; a failed touch does not fail authentication.
        if let Err(error) = self.repository.touch_last_used(token.uuid).await {
            warn!(token = %token.uuid, error = %error, "auth.touch_failed");
        }

        debug!(token = %token.uuid, role = token.principal.role(), "auth.authenticated");

        Ok(token.principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the party it acts for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

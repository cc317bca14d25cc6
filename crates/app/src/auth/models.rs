//! Auth data models.

use jiff::Timestamp;
use venda::{principal::Principal, uuids::TypedUuid};

/// API token marker
#[derive(Debug)]
pub struct ApiToken;

/// API token UUID
pub type ApiTokenUuid = TypedUuid<ApiToken>;

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTokenMetadata {
    pub uuid: ApiTokenUuid,

    /// Party the token acts for.
    pub principal: Principal,

    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// API token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

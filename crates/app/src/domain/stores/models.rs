//! Store Models

use jiff::Timestamp;

pub use venda::principal::StoreUuid;

/// Store Model
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub uuid: StoreUuid,
    pub name: String,
    pub is_open: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Store Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
}

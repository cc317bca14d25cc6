//! Principals
//!
//! Every operation in the marketplace is performed on behalf of exactly one
//! authenticated party: either a customer buying food or a store selling it.

use crate::uuids::TypedUuid;

/// Customer marker
#[derive(Debug)]
pub struct Customer;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// Store marker
#[derive(Debug)]
pub struct Store;

/// Store UUID
pub type StoreUuid = TypedUuid<Store>;

/// The authenticated party a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    /// A buyer with a cart and orders.
    Customer(CustomerUuid),

    /// A seller that owns products and fulfills orders.
    Store(StoreUuid),
}

impl Principal {
    /// The customer id, when acting as a customer.
    #[must_use]
    pub const fn customer(self) -> Option<CustomerUuid> {
        match self {
            Self::Customer(uuid) => Some(uuid),
            Self::Store(_) => None,
        }
    }

    /// The store id, when acting as a store.
    #[must_use]
    pub const fn store(self) -> Option<StoreUuid> {
        match self {
            Self::Store(uuid) => Some(uuid),
            Self::Customer(_) => None,
        }
    }

    /// Short role name, used in logs and error details.
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::Customer(_) => "customer",
            Self::Store(_) => "store",
        }
    }
}

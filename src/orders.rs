//! Orders
//!
//! Order status state machine, transition authorization and order codes.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    principal::{CustomerUuid, Principal, StoreUuid},
    uuids::TypedUuid,
};

/// Order marker
#[derive(Debug)]
pub struct Order;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order status.
///
/// ```text
/// pending -> preparing -> en_route -> delivered
///    |           |
///    +-----------+-----> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the store
    Pending,

    /// Being prepared by the store
    Preparing,

    /// Out for delivery
    EnRoute,

    /// Handed to the customer
    Delivered,

    /// Cancelled by the customer
    Cancelled,
}

impl OrderStatus {
    /// Statuses a store still has to act on.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::Preparing, Self::EnRoute];

    /// Storage and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::EnRoute => "en_route",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether the order is still in the store's queue.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// The single forward step from this status.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::EnRoute),
            Self::EnRoute => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Move one step forward to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when `to` is not the next status.
    pub fn advance_to(self, to: Self) -> Result<Self, TransitionError> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(TransitionError { from: self, to })
        }
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] unless the order is pending or preparing.
    pub fn cancel(self) -> Result<Self, TransitionError> {
        match self {
            Self::Pending | Self::Preparing => Ok(Self::Cancelled),
            _ => Err(TransitionError {
                from: self,
                to: Self::Cancelled,
            }),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "en_route" => Ok(Self::EnRoute),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Illegal status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move order from {from} to {to}")]
pub struct TransitionError {
    /// Current status
    pub from: OrderStatus,

    /// Requested status
    pub to: OrderStatus,
}

/// Errors raised when planning a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The principal may not drive this change on this order.
    #[error("{role} may not move this order to {to}")]
    PermissionDenied {
        /// Role of the acting principal
        role: &'static str,

        /// Requested status
        to: OrderStatus,
    },

    /// The change is not a legal transition.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

/// Who an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderParties {
    /// Buyer
    pub customer: CustomerUuid,

    /// Seller
    pub store: StoreUuid,
}

impl OrderParties {
    /// Whether the principal is the buyer or the seller.
    #[must_use]
    pub fn involves(&self, principal: Principal) -> bool {
        match principal {
            Principal::Customer(customer) => customer == self.customer,
            Principal::Store(store) => store == self.store,
        }
    }
}

/// An authorized, legal status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Store moves the order one step forward.
    Advance {
        /// New status
        to: OrderStatus,
    },

    /// Customer cancels; stock must be released.
    Cancel,
}

impl StatusChange {
    /// Status after the change.
    #[must_use]
    pub const fn status(self) -> OrderStatus {
        match self {
            Self::Advance { to } => to,
            Self::Cancel => OrderStatus::Cancelled,
        }
    }
}

/// Authorize and validate moving an order from `from` to `to`.
///
/// Authorization is checked before legality: cancellation belongs to the
/// owning customer, every other target to the owning store.
///
/// # Errors
///
/// Returns [`OrderError::PermissionDenied`] for the wrong principal and
/// [`OrderError::InvalidTransition`] for an illegal change.
pub fn plan_transition(
    principal: Principal,
    parties: OrderParties,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<StatusChange, OrderError> {
    let denied = OrderError::PermissionDenied {
        role: principal.role(),
        to,
    };

    if to == OrderStatus::Cancelled {
        if principal != Principal::Customer(parties.customer) {
            return Err(denied);
        }

        from.cancel()?;

        return Ok(StatusChange::Cancel);
    }

    if principal != Principal::Store(parties.store) {
        return Err(denied);
    }

    let to = from.advance_to(to)?;

    Ok(StatusChange::Advance { to })
}

/// Short human-facing order reference: 12 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(String);

impl OrderCode {
    /// Number of characters in a code.
    pub const LEN: usize = 12;

    /// Generate a random code.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; Self::LEN / 2] = rand::thread_rng().r#gen();

        Self(bytes.iter().map(|byte| format!("{byte:02X}")).collect())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap a stored code.
    #[must_use]
    pub fn from_stored(code: String) -> Self {
        Self(code)
    }
}

impl Display for OrderCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

//! Checkout
//!
//! Turns a cart whose products were re-read under lock into an order draft,
//! reserving stock through the inventory ledger. Storage persists the draft
//! and the ledger's changed levels in the same transaction, or nothing at all.

use jiff::civil::Date;
use thiserror::Error;

use crate::{
    carts::Cart,
    catalog::{MAX_AMOUNT, ProductUuid},
    inventory::{InventoryError, InventoryLedger},
    principal::{CustomerUuid, StoreUuid},
    uuids::TypedUuid,
};

/// Delivery address marker
#[derive(Debug)]
pub struct DeliveryAddress;

/// Address UUID
pub type AddressUuid = TypedUuid<DeliveryAddress>;

/// Payment method marker
#[derive(Debug)]
pub struct PaymentMethod;

/// Payment method UUID
pub type PaymentMethodUuid = TypedUuid<PaymentMethod>;

/// Checkout failures, in the order the preconditions are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The customer has no usable delivery address.
    #[error("customer has no delivery address")]
    MissingAddress,

    /// The payment method is unknown, inactive or not the customer's.
    #[error("payment method is not valid for this customer")]
    InvalidPaymentMethod,

    /// A line asks for more than is in stock.
    #[error(transparent)]
    Stock(#[from] InventoryError),

    /// The order total exceeds [`MAX_AMOUNT`].
    #[error("order total is out of range")]
    TotalOutOfRange,
}

/// What checkout needs to know about the chosen payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentMethodRef {
    /// Payment method id
    pub uuid: PaymentMethodUuid,

    /// Owning customer
    pub customer: CustomerUuid,

    /// Whether it may still be used
    pub active: bool,
}

/// Order line about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraftItem {
    /// Product
    pub product: ProductUuid,

    /// Units ordered
    pub quantity: u32,

    /// Unit price snapshot
    pub price: u64,

    /// Line fulfillment date carried over from the cart
    pub fulfillment_date: Option<Date>,
}

/// Order header and lines about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Buyer
    pub customer: CustomerUuid,

    /// Seller
    pub store: StoreUuid,

    /// Payment method used
    pub payment_method: PaymentMethodUuid,

    /// Delivery address
    pub address: AddressUuid,

    /// Frozen total
    pub total: u64,

    /// Lines with price snapshots
    pub items: Vec<OrderDraftItem>,
}

/// Validate the checkout preconditions and reserve stock for every line.
///
/// `cart` must carry products read under lock, and `ledger` must track the
/// same rows. On failure the ledger may hold partial reservations; callers
/// discard it together with the transaction.
///
/// # Errors
///
/// Returns the first failing precondition, checked in this order: empty
/// cart, missing address, invalid payment method, insufficient stock, total
/// out of range.
pub fn prepare_order(
    customer: CustomerUuid,
    cart: &Cart,
    address: Option<AddressUuid>,
    payment_method: Option<PaymentMethodRef>,
    ledger: &mut InventoryLedger,
) -> Result<OrderDraft, CheckoutError> {
    let store = cart.store().ok_or(CheckoutError::EmptyCart)?;

    let address = address.ok_or(CheckoutError::MissingAddress)?;

    let payment_method = payment_method
        .filter(|method| method.active && method.customer == customer)
        .ok_or(CheckoutError::InvalidPaymentMethod)?;

    let mut items = Vec::with_capacity(cart.lines().len());

    for line in cart.lines() {
        ledger.reserve(line.product.uuid, line.quantity)?;

        items.push(OrderDraftItem {
            product: line.product.uuid,
            quantity: line.quantity,
            price: line.product.price,
            fulfillment_date: line.fulfillment_date,
        });
    }

    let total = cart.total();

    if total > MAX_AMOUNT {
        return Err(CheckoutError::TotalOutOfRange);
    }

    Ok(OrderDraft {
        customer,
        store,
        payment_method: payment_method.uuid,
        address,
        total,
        items,
    })
}

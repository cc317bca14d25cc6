//! Address and payment method bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venda_app::domain::customers::models::{Address, PaymentMethod};

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    /// The unique identifier of the address
    pub uuid: Uuid,

    pub street: String,

    pub number: String,

    pub district: String,

    pub city: String,

    pub postal_code: String,

    /// The date and time the address was added
    pub created_at: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            uuid: address.uuid.into(),
            street: address.street,
            number: address.number,
            district: address.district,
            city: address.city,
            postal_code: address.postal_code,
            created_at: address.created_at.to_string(),
        }
    }
}

/// Payment Method Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMethodResponse {
    /// The unique identifier of the payment method
    pub uuid: Uuid,

    /// Label, e.g. "Visa"
    pub name: String,

    /// Masked details, e.g. "**** 4242"
    pub details: String,

    /// Whether the method can be used at checkout
    pub active: bool,

    /// The date and time the method was added
    pub created_at: String,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(method: PaymentMethod) -> Self {
        Self {
            uuid: method.uuid.into(),
            name: method.name,
            details: method.details,
            active: method.active,
            created_at: method.created_at.to_string(),
        }
    }
}

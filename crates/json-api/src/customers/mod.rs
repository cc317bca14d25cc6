//! Customer profile: delivery addresses and payment methods.

pub(crate) mod addresses;
mod errors;
mod models;
pub(crate) mod payment_methods;

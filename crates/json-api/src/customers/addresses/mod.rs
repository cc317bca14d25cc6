//! Delivery Addresses

pub(crate) mod handlers;

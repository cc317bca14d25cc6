//! Payment Methods

pub(crate) mod handlers;

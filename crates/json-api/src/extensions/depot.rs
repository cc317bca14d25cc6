//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use venda::principal::{CustomerUuid, Principal, StoreUuid};

const PRINCIPAL_DEPOT_KEY: &str = "venda.principal";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// The authenticated customer; stores get a 403.
    fn customer_or_403(&self) -> Result<CustomerUuid, StatusError>;

    /// The authenticated store; customers get a 403.
    fn store_or_403(&self) -> Result<StoreUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.insert(PRINCIPAL_DEPOT_KEY, principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.get::<Principal>(PRINCIPAL_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn customer_or_403(&self) -> Result<CustomerUuid, StatusError> {
        self.principal_or_401()?.customer().ok_or_else(|| {
            StatusError::forbidden()
                .brief("permission_denied")
                .detail("only customers can do this")
        })
    }

    fn store_or_403(&self) -> Result<StoreUuid, StatusError> {
        self.principal_or_401()?.store().ok_or_else(|| {
            StatusError::forbidden()
                .brief("permission_denied")
                .detail("only stores can do this")
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_principal_is_unauthorized() {
        let depot = Depot::new();

        let result = depot.principal_or_401();

        assert_eq!(
            result.map_err(|error| error.code),
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let customer = CustomerUuid::new();
        let mut depot = Depot::new();

        depot.insert_principal(Principal::Customer(customer));

        assert_eq!(depot.customer_or_403().ok(), Some(customer));
        assert_eq!(
            depot.store_or_403().map_err(|error| error.code),
            Err(StatusCode::FORBIDDEN)
        );
    }
}

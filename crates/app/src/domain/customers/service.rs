//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        models::{
            Address, AddressUuid, Customer, CustomerUuid, NewAddress, NewCustomer,
            NewPaymentMethod, PaymentMethod, PaymentMethodUuid,
        },
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_customer(&self, customer: CustomerUuid) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn add_address(
        &self,
        customer: CustomerUuid,
        address: NewAddress,
    ) -> Result<Address, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_address(&mut tx, customer, address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_addresses(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn remove_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_address(&mut tx, customer, address)
            .await?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn add_payment_method(
        &self,
        customer: CustomerUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_payment_method(&mut tx, customer, method)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_payment_methods(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PaymentMethod>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let methods = self
            .repository
            .list_payment_methods(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(methods)
    }

    async fn set_payment_method_active(
        &self,
        customer: CustomerUuid,
        method: PaymentMethodUuid,
        active: bool,
    ) -> Result<PaymentMethod, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_payment_method_active(&mut tx, customer, method, active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Register a new customer.
    async fn create_customer(&self, customer: NewCustomer)
    -> Result<Customer, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(&self, customer: CustomerUuid) -> Result<Customer, CustomersServiceError>;

    /// Add a delivery address.
    async fn add_address(
        &self,
        customer: CustomerUuid,
        address: NewAddress,
    ) -> Result<Address, CustomersServiceError>;

    /// Usable addresses, newest first.
    async fn list_addresses(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, CustomersServiceError>;

    /// Soft-delete an address. Orders keep referring to it.
    async fn remove_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<(), CustomersServiceError>;

    /// Add a payment method.
    async fn add_payment_method(
        &self,
        customer: CustomerUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, CustomersServiceError>;

    /// All payment methods, active or not.
    async fn list_payment_methods(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PaymentMethod>, CustomersServiceError>;

    /// Activate or deactivate one of the customer's payment methods.
    async fn set_payment_method_active(
        &self,
        customer: CustomerUuid,
        method: PaymentMethodUuid,
        active: bool,
    ) -> Result<PaymentMethod, CustomersServiceError>;
}

//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use venda::checkout::PaymentMethodRef;

use crate::domain::customers::models::{
    Address, AddressUuid, Customer, CustomerUuid, NewAddress, NewCustomer, NewPaymentMethod,
    PaymentMethod, PaymentMethodUuid,
};

const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");
const FIND_USABLE_ADDRESS_SQL: &str = include_str!("sql/find_usable_address.sql");
const CREATE_PAYMENT_METHOD_SQL: &str = include_str!("sql/create_payment_method.sql");
const LIST_PAYMENT_METHODS_SQL: &str = include_str!("sql/list_payment_methods.sql");
const SET_PAYMENT_METHOD_ACTIVE_SQL: &str = include_str!("sql/set_payment_method_active.sql");
const FIND_PAYMENT_METHOD_SQL: &str = include_str!("sql/find_payment_method.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: NewCustomer,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(customer.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        address: NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(address.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(address.street)
            .bind(address.number)
            .bind(address.district)
            .bind(address.city)
            .bind(address.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_ADDRESSES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// The requested address when it is usable, or the customer's most
    /// recent usable address when none is requested.
    pub(crate) async fn find_usable_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        requested: Option<AddressUuid>,
    ) -> Result<Option<AddressUuid>, sqlx::Error> {
        let row = query(FIND_USABLE_ADDRESS_SQL)
            .bind(customer.into_uuid())
            .bind(requested.map(AddressUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| row.try_get("uuid").map(AddressUuid::from_uuid))
            .transpose()
    }

    pub(crate) async fn create_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, sqlx::Error> {
        query_as::<Postgres, PaymentMethod>(CREATE_PAYMENT_METHOD_SQL)
            .bind(method.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(method.name)
            .bind(method.details)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_payment_methods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        query_as::<Postgres, PaymentMethod>(LIST_PAYMENT_METHODS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_payment_method_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        method: PaymentMethodUuid,
        active: bool,
    ) -> Result<PaymentMethod, sqlx::Error> {
        query_as::<Postgres, PaymentMethod>(SET_PAYMENT_METHOD_ACTIVE_SQL)
            .bind(method.into_uuid())
            .bind(customer.into_uuid())
            .bind(active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        method: PaymentMethodUuid,
    ) -> Result<Option<PaymentMethodRef>, sqlx::Error> {
        let row = query(FIND_PAYMENT_METHOD_SQL)
            .bind(method.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(PaymentMethodRef {
                uuid: PaymentMethodUuid::from_uuid(row.try_get("uuid")?),
                customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
                active: row.try_get("active")?,
            })
        })
        .transpose()
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            district: row.try_get("district")?,
            city: row.try_get("city")?,
            postal_code: row.try_get("postal_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentMethod {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentMethodUuid::from_uuid(row.try_get("uuid")?),
            customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            name: row.try_get("name")?,
            details: row.try_get("details")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

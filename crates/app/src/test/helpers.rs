//! Test Helpers

use testresult::TestResult;

use crate::{
    domain::{
        carts::{CartsService, models::NewCartItem},
        checkout::{CheckoutService, models::CheckoutRequest},
        customers::{
            CustomersService,
            models::{AddressUuid, CustomerUuid, NewAddress, NewPaymentMethod, PaymentMethodUuid},
        },
        orders::models::Order,
        stores::models::StoreUuid,
    },
    test::TestContext,
};

pub(crate) fn new_address() -> NewAddress {
    NewAddress {
        uuid: AddressUuid::new(),
        street: "Rua Augusta".to_string(),
        number: "1500".to_string(),
        district: "Consolacao".to_string(),
        city: "Sao Paulo".to_string(),
        postal_code: "01304-001".to_string(),
    }
}

/// A customer with an address and an active payment method.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shopper {
    pub customer: CustomerUuid,
    pub address: AddressUuid,
    pub payment_method: PaymentMethodUuid,
}

impl Shopper {
    pub async fn ready(ctx: &TestContext) -> TestResult<Self> {
        let customer = ctx.create_customer("Ana").await?;
        let address = ctx.customers.add_address(customer, new_address()).await?;
        let payment_method = ctx
            .customers
            .add_payment_method(
                customer,
                NewPaymentMethod {
                    uuid: PaymentMethodUuid::new(),
                    name: "Visa".to_string(),
                    details: "**** 4242".to_string(),
                },
            )
            .await?;

        Ok(Self {
            customer,
            address: address.uuid,
            payment_method: payment_method.uuid,
        })
    }

    pub fn request(&self) -> CheckoutRequest {
        CheckoutRequest {
            payment_method: self.payment_method,
            address: None,
        }
    }

    /// Check out `quantity` units of a fresh product from a fresh store.
    pub async fn order(
        &self,
        ctx: &TestContext,
        price: u64,
        available: u32,
        quantity: u32,
    ) -> TestResult<Order> {
        let store = ctx.create_store("Napoli").await?;

        self.order_from(ctx, store, price, available, quantity).await
    }

    /// Check out `quantity` units of a fresh product from `store`.
    pub async fn order_from(
        &self,
        ctx: &TestContext,
        store: StoreUuid,
        price: u64,
        available: u32,
        quantity: u32,
    ) -> TestResult<Order> {
        let product = ctx.create_product(store, price, available).await?;

        ctx.carts
            .add_item(
                self.customer,
                NewCartItem {
                    product: product.uuid,
                    quantity,
                    fulfillment_date: None,
                },
            )
            .await?;

        Ok(ctx.checkout.checkout(self.customer, self.request()).await?)
    }
}

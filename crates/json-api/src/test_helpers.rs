//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use venda::principal::{CustomerUuid, Principal, StoreUuid};
use venda_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartItem, CartItemUuid, CartUuid, ProductUuid},
        },
        checkout::MockCheckoutService,
        customers::{
            MockCustomersService,
            models::{Address, PaymentMethod},
        },
        orders::{
            MockOrdersService,
            models::{
                AddressUuid, Order, OrderCode, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
                PaymentMethodUuid,
            },
        },
        products::{MockProductsService, models::Product},
        stores::{MockStoresService, models::Store},
    },
    health::MockHealthService,
};

use crate::{extensions::*, state::State};

/// Mocks for every service; anything a test does not configure must not be
/// called.
pub(crate) struct Mocks {
    pub(crate) stores: MockStoresService,
    pub(crate) customers: MockCustomersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
    pub(crate) health: MockHealthService,
}

impl Default for Mocks {
    fn default() -> Self {
        let mut stores = MockStoresService::new();

        stores.expect_create_store().never();
        stores.expect_get_store().never();
        stores.expect_list_stores().never();
        stores.expect_set_open().never();

        let mut customers = MockCustomersService::new();

        customers.expect_create_customer().never();
        customers.expect_get_customer().never();
        customers.expect_add_address().never();
        customers.expect_list_addresses().never();
        customers.expect_remove_address().never();
        customers.expect_add_payment_method().never();
        customers.expect_list_payment_methods().never();
        customers.expect_set_payment_method_active().never();

        let mut products = MockProductsService::new();

        products.expect_list_products().never();
        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_restock().never();

        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();
        carts.expect_add_item().never();
        carts.expect_set_quantity().never();
        carts.expect_remove_item().never();
        carts.expect_clear().never();

        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().never();

        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();
        orders.expect_list_store_history().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();
        orders.expect_cancel().never();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let mut health = MockHealthService::new();

        health.expect_database_reachable().never();

        Self {
            stores,
            customers,
            products,
            carts,
            checkout,
            orders,
            auth,
            health,
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::new(AppContext {
            stores: Arc::new(self.stores),
            customers: Arc::new(self.customers),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
            health: Arc::new(self.health),
        })
    }

    /// Serve `route` as `principal`, skipping token authentication.
    pub(crate) fn service_as(self, principal: Principal, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(InjectPrincipal(principal))
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

struct InjectPrincipal(Principal);

#[async_trait]
impl Handler for InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn make_product(uuid: ProductUuid, store: StoreUuid) -> Product {
    Product {
        uuid,
        store,
        name: "Margherita".to_string(),
        description: "Tomato, mozzarella, basil".to_string(),
        price: 45_00,
        available: 10,
        is_available: true,
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_store(uuid: StoreUuid, name: &str, is_open: bool) -> Store {
    Store {
        uuid,
        name: name.to_string(),
        is_open,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_address(uuid: AddressUuid, customer: CustomerUuid) -> Address {
    Address {
        uuid,
        customer,
        street: "Rua Augusta".to_string(),
        number: "1500".to_string(),
        district: "Consolacao".to_string(),
        city: "Sao Paulo".to_string(),
        postal_code: "01304-001".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_payment_method(
    uuid: PaymentMethodUuid,
    customer: CustomerUuid,
    active: bool,
) -> PaymentMethod {
    PaymentMethod {
        uuid,
        customer,
        name: "Visa".to_string(),
        details: "**** 4242".to_string(),
        active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, quantity: u32) -> CartItem {
    CartItem {
        uuid: CartItemUuid::new(),
        product,
        product_name: "Margherita".to_string(),
        unit_price: 45_00,
        quantity,
        subtotal: 45_00 * u64::from(quantity),
        fulfillment_date: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(customer: CustomerUuid, items: Vec<CartItem>) -> Cart {
    Cart {
        uuid: CartUuid::new(),
        customer,
        store: (!items.is_empty()).then(StoreUuid::new),
        total: items.iter().map(|item| item.subtotal).sum(),
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(
    uuid: OrderUuid,
    customer: CustomerUuid,
    store: StoreUuid,
    status: OrderStatus,
) -> Order {
    Order {
        uuid,
        code: OrderCode::from_stored("0A1B2C3D4E5F".to_string()),
        customer,
        store,
        payment_method: PaymentMethodUuid::new(),
        address: AddressUuid::new(),
        status,
        total: 90_00,
        items: vec![OrderItem {
            uuid: OrderItemUuid::new(),
            product: ProductUuid::new(),
            quantity: 2,
            price: 45_00,
            fulfillment_date: None,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

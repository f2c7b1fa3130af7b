//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use cables_shop_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService, catalog::MockCatalogService, checkout::MockCheckoutService,
        customers::{MockCustomersService, records::CustomerUuid},
        orders::MockOrdersService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Mocks left at their default fail on any call.
#[derive(Default)]
pub(crate) struct MockServices {
    pub catalog: MockCatalogService,
    pub customers: MockCustomersService,
    pub carts: MockCartsService,
    pub checkout: MockCheckoutService,
    pub orders: MockOrdersService,
    pub auth: MockAuthService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            customers: Arc::new(self.customers),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` with no customer attached.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as [`TEST_CUSTOMER_UUID`].
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    MockServices {
        catalog,
        ..MockServices::default()
    }
    .anonymous_service(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    MockServices {
        carts,
        ..MockServices::default()
    }
    .service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    MockServices {
        orders,
        ..MockServices::default()
    }
    .service(route)
}

pub(crate) fn customers_service(customers: MockCustomersService, route: Router) -> Service {
    MockServices {
        customers,
        ..MockServices::default()
    }
    .service(route)
}

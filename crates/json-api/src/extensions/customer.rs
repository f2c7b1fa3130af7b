//! Authenticated customer stored in the depot.

use salvo::prelude::{Depot, StatusError};

use cables_shop_app::domain::customers::records::CustomerUuid;

const CUSTOMER_UUID_DEPOT_KEY: &str = "customer_uuid";

pub(crate) trait CustomerDepotExt {
    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    /// The bearer's customer, if the request was authenticated.
    fn customer_uuid(&self) -> Option<CustomerUuid>;

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl CustomerDepotExt for Depot {
    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_DEPOT_KEY, customer);
    }

    fn customer_uuid(&self) -> Option<CustomerUuid> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_DEPOT_KEY)
            .ok()
            .copied()
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.customer_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}

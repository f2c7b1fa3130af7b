//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::customers::data::Profile;

use crate::{
    contact::AddressResponse, extensions::*, profile::errors::into_status_error, state::State,
};

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,

    /// Pre-fills the checkout form
    pub primary_address: Option<AddressResponse>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let customer = profile.customer;

        Self {
            uuid: customer.uuid.into(),
            email: customer.email,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone: customer.phone,
            primary_address: profile.primary_address.map(Into::into),
        }
    }
}

/// Get Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let profile = state
        .app
        .customers
        .get_profile(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

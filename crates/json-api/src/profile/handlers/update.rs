//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cables_shop_app::domain::customers::data::ProfileUpdate;

use crate::{
    contact::{AddressRequest, ContactRequest},
    extensions::*,
    profile::{errors::into_status_error, get::ProfileResponse},
    state::State,
};

/// Update Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    #[serde(flatten)]
    pub contact: ContactRequest,

    /// Becomes the primary shipping address unless blank
    #[serde(default)]
    pub address: Option<AddressRequest>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            contact: request.contact.into(),
            address: request.address.map(Into::into),
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::CONFLICT, description = "Phone number already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "profile.update",
    skip(json, depot),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let profile = state
        .app
        .customers
        .update_profile(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cables_shop_app::domain::customers::{CustomersServiceError, MockCustomersService};

    use crate::{
        profile::handlers::tests::make_profile,
        test_helpers::{TEST_CUSTOMER_UUID, customers_service},
    };

    use super::*;

    fn make_service(customers: MockCustomersService) -> Service {
        customers_service(customers, Router::with_path("profile").put(handler))
    }

    #[tokio::test]
    async fn test_update_profile_forwards_contact_and_address() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_update_profile()
            .once()
            .withf(|customer, update| {
                *customer == TEST_CUSTOMER_UUID
                    && update.contact.first_name == "Ada"
                    && update
                        .address
                        .as_ref()
                        .is_some_and(|address| address.city == "Shelbyville")
            })
            .return_once(|customer, _| Ok(make_profile(customer, Some("Shelbyville"))));

        let response: ProfileResponse = TestClient::put("http://example.com/profile")
            .json(&json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone": "+1 555 0100",
                "address": { "address": "1 Main St", "city": "Shelbyville" },
            }))
            .send(&make_service(customers))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response.primary_address.map(|address| address.city),
            Some("Shelbyville".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_with_taken_phone_returns_409() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::DuplicateContact));

        let res = TestClient::put("http://example.com/profile")
            .json(&json!({ "first_name": "Ada", "phone": "+1 555 0199" }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

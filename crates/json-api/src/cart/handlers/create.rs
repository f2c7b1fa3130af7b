//! Create Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCreatedResponse {
    /// The customer's active cart
    pub uuid: Uuid,
}

/// Create Cart Handler
///
/// Returns the customer's active cart, creating it on first use. Safe to call
/// on every login.
#[endpoint(
    tags("cart"),
    summary = "Get Or Create Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let uuid = state
        .app
        .carts
        .get_or_create_active_cart(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cables_shop_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        orders::records::OrderUuid,
    };

    use crate::test_helpers::{TEST_CUSTOMER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").post(handler))
    }

    #[tokio::test]
    async fn test_create_cart_returns_active_cart() -> TestResult {
        let order = OrderUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_or_create_active_cart()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(move |_| Ok(order));

        let response: CartCreatedResponse = TestClient::post("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, order.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_cart_for_unknown_customer_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_or_create_active_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

//! Update Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use cables_shop_app::domain::carts::{CartsServiceError, data::CartAction};

use crate::{extensions::*, state::State};

pub(crate) const CART_UPDATED: &str = "Cart has been updated";
pub(crate) const PARSE_FAILED: &str = "Error during parsing response";
pub(crate) const UPDATE_FAILED: &str = "Error during cart update";

/// Cart Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartUpdateRequest {
    pub product_id: Uuid,

    /// `add_to_cart`, `remove_from_cart` or `delete_from_cart`
    pub action: String,
}

/// Update Cart Handler
///
/// Adds one unit, removes one unit, or drops the product's line. Answers with
/// a status message string.
#[endpoint(
    tags("cart"),
    summary = "Update Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart has been updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed body or unknown action"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Storage failure"),
    ),
)]
#[tracing::instrument(
    name = "cart.update",
    skip(req, depot, res),
    fields(customer_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let (status, message) = match parse_request(req).await {
        Some((product, action)) => match state
            .app
            .carts
            .apply_cart_action(customer, product.into(), action)
            .await
        {
            Ok(_quantity) => (StatusCode::OK, CART_UPDATED),
            Err(CartsServiceError::InvalidRequest) => (StatusCode::BAD_REQUEST, PARSE_FAILED),
            Err(CartsServiceError::ProductNotFound | CartsServiceError::NotFound) => {
                (StatusCode::NOT_FOUND, UPDATE_FAILED)
            }
            Err(error) => {
                error!("failed to update cart: {error}");

                (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
            }
        },
        None => (StatusCode::BAD_REQUEST, PARSE_FAILED),
    };

    res.render(Json(message));

    Ok(status)
}

async fn parse_request(req: &mut Request) -> Option<(Uuid, CartAction)> {
    let request = req.parse_json::<CartUpdateRequest>().await.ok()?;
    let action = request.action.parse::<CartAction>().ok()?;

    Some((request.product_id, action))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cables_shop_app::domain::{carts::MockCartsService, catalog::records::ProductUuid};

    use crate::test_helpers::{TEST_CUSTOMER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/update").post(handler))
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_updated_message() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_apply_cart_action()
            .once()
            .withf(move |customer, product_uuid, action| {
                *customer == TEST_CUSTOMER_UUID
                    && *product_uuid == product
                    && *action == CartAction::Increment
            })
            .return_once(|_, _, _| Ok(1));

        let mut res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": product.into_uuid(), "action": "add_to_cart" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_json::<String>().await?, CART_UPDATED);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_apply_cart_action().never();

        let mut res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "action": "double" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(res.take_json::<String>().await?, PARSE_FAILED);

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_apply_cart_action().never();

        let mut res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": "not-a-uuid", "action": "add_to_cart" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(res.take_json::<String>().await?, PARSE_FAILED);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_cart_action()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ProductNotFound));

        let mut res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "action": "remove_from_cart" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(res.take_json::<String>().await?, UPDATE_FAILED);

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_cart_action()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "action": "delete_from_cart" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

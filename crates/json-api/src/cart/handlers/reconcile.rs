//! Reconcile Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReconcileResponse {
    /// Lines clamped to stock or removed
    pub adjusted: usize,
}

/// Reconcile Cart Handler
///
/// Lowers every line to what is currently in stock, dropping sold-out lines.
#[endpoint(
    tags("cart"),
    summary = "Reconcile Cart With Stock",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReconcileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let adjusted = state
        .app
        .carts
        .reconcile_cart(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReconcileResponse { adjusted }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cables_shop_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, carts_service};

    use super::*;

    #[tokio::test]
    async fn test_reconcile_reports_adjusted_lines() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_reconcile_cart()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(|_| Ok(2));

        let response: ReconcileResponse = TestClient::post("http://example.com/cart/reconcile")
            .send(&carts_service(
                carts,
                Router::with_path("cart/reconcile").post(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.adjusted, 2);

        Ok(())
    }
}

//! Cart Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCountResponse {
    /// Units in the cart; 0 for anonymous visitors
    pub count: u64,
}

/// Cart Count Handler
///
/// Badge count for the header. Never fails: storage errors are logged and
/// reported as an empty cart.
#[endpoint(tags("cart"), summary = "Cart Item Count")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let count = state
        .app
        .carts
        .cart_item_count(depot.customer_uuid())
        .await
        .unwrap_or_else(|error| {
            error!("failed to count cart items: {error}");

            0
        });

    Ok(Json(CartCountResponse { count }))
}

//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::carts::data::{CartLine, CartSummary};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The active cart, absent until the first item is added
    pub uuid: Option<Uuid>,

    pub lines: Vec<CartLineResponse>,

    /// Sum of line totals at live prices
    pub products_total: u64,

    /// Surcharge applied if the order is delivered
    pub delivery_price: u64,

    /// Products total plus delivery
    pub total_price: u64,

    /// Number of distinct products
    pub line_count: usize,

    /// Number of units across all lines
    pub total_quantity: u64,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            uuid: summary.order_uuid.map(Into::into),
            lines: summary.lines.into_iter().map(Into::into).collect(),
            products_total: summary.products_total,
            delivery_price: summary.delivery_price,
            total_price: summary.total_price,
            line_count: summary.line_count,
            total_quantity: summary.total_quantity,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
    pub units_in_stock: u32,

    /// Whether the requested quantity can currently be fulfilled
    pub in_stock: bool,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product_uuid: line.product_uuid.into(),
            product_name: line.product_name,
            unit_price: line.unit_price,
            in_stock: line.quantity <= line.units_in_stock,
            quantity: line.quantity,
            line_total: line.line_total,
            units_in_stock: line.units_in_stock,
        }
    }
}

/// Get Cart Handler
///
/// Summarises the customer's cart at live prices.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let summary = state
        .app
        .carts
        .cart_summary(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

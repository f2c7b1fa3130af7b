//! Get Order Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::orders::{data::PlacedOrder, records::LineItemRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `accepted`, `preparing`, `shipped` or `complete`
    pub status: String,

    /// `delivery` or `pick_up`
    pub delivery_type: String,

    pub shipping_address_uuid: Option<Uuid>,

    /// Surcharge frozen at checkout
    pub delivery_price: u64,

    pub items: Vec<OrderItemResponse>,
    pub products_total: u64,
    pub total_price: u64,

    /// When the order was placed
    pub placed_at: Option<String>,
}

impl From<PlacedOrder> for OrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        let order = placed.order;

        Self {
            uuid: order.uuid.into(),
            status: order.status.as_str().to_string(),
            delivery_type: order.delivery_type.as_str().to_string(),
            shipping_address_uuid: order.shipping_address_uuid.map(Into::into),
            delivery_price: order.delivery_price.unwrap_or_default(),
            items: placed.items.into_iter().map(Into::into).collect(),
            products_total: placed.products_total,
            total_price: placed.total_price,
            placed_at: order.placed_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price frozen at checkout
    pub unit_price: u64,
}

impl From<LineItemRecord> for OrderItemResponse {
    fn from(item: LineItemRecord) -> Self {
        Self {
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let placed = state
        .app
        .orders
        .get_order(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(placed.into()))
}

//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use cables_shop_app::domain::{
    checkout::{CheckoutServiceError, data::CheckoutForm},
    orders::records::DeliveryType,
};

use crate::{
    checkout::errors::{insufficient_stock, into_status_error},
    contact::{AddressRequest, ContactRequest},
    extensions::*,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    #[serde(flatten)]
    pub contact: ContactRequest,

    /// `delivery` or `pick_up`
    pub delivery_type: String,

    /// Required for delivery, ignored for pick-up
    #[serde(default)]
    pub address: Option<AddressRequest>,
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// The accepted order
    pub uuid: Uuid,
}

/// Checkout Handler
///
/// Places the customer's cart as an order. When stock ran out in the meantime
/// the cart is clamped to what is left and the request fails with 409 so the
/// customer can review it.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or malformed form"),
        (status_code = StatusCode::CONFLICT, description = "Phone in use or not enough stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Delivery address missing"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let request = json.into_inner();

    let delivery_type = request
        .delivery_type
        .parse::<DeliveryType>()
        .or_400("unknown delivery type")?;

    let form = CheckoutForm {
        contact: request.contact.into(),
        delivery_type,
        address: request.address.map(Into::into),
    };

    let order = match state.app.checkout.checkout(customer, form).await {
        Ok(order) => order,
        Err(CheckoutServiceError::InsufficientStock { shortages }) => {
            if let Err(source) = state.app.carts.reconcile_cart(customer).await {
                error!("failed to reconcile cart after stock shortage: {source}");
            }

            return Err(insufficient_stock(&shortages));
        }
        Err(error) => return Err(into_status_error(error)),
    };

    info!(order_uuid = %order, "order placed");

    res.add_header(LOCATION, format!("/orders/{order}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse { uuid: order.into() }))
}

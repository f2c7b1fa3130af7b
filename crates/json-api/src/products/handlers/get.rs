//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::catalog::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The category (cable type) the product belongs to
    pub category_uuid: Uuid,

    pub name: String,
    pub slug: String,
    pub description: Option<String>,

    /// Cable length in centimetres
    pub length_cm: u32,

    /// The price of the product in minor currency units
    pub price: u64,

    pub units_in_stock: u32,
    pub in_stock: bool,
    pub photo: Option<String>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            category_uuid: product.category_uuid.into(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            length_cm: product.length_cm,
            price: product.price,
            in_stock: product.units_in_stock > 0,
            units_in_stock: product.units_in_stock,
            photo: product.photo,
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

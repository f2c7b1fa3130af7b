//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use cables_shop_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::Sql(source) => {
            error!("failed to fetch product: {source}");

            StatusError::internal_server_error()
        }
        other => {
            error!("unexpected catalog error: {other}");

            StatusError::internal_server_error()
        }
    }
}

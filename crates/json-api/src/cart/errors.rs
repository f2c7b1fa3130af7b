//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use cables_shop_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidRequest => StatusError::bad_request().brief("Malformed cart request"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CartsServiceError::InvalidData => {
            error!("cart data could not be decoded");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

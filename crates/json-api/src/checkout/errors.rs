//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use cables_shop_app::domain::{checkout::CheckoutServiceError, orders::data::StockShortage};

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutServiceError::DuplicateContact => {
            StatusError::conflict().brief("Phone number is already in use")
        }
        CheckoutServiceError::InsufficientStock { shortages } => insufficient_stock(&shortages),
        CheckoutServiceError::MissingShippingAddress => StatusError::unprocessable_entity()
            .brief("Delivery requires a street address and city"),
        CheckoutServiceError::InvalidTransition { from } => {
            StatusError::conflict().brief(format!("Order is already {from}"))
        }
        CheckoutServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CheckoutServiceError::InvalidData => {
            error!("checkout data could not be stored");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn insufficient_stock(shortages: &[StockShortage]) -> StatusError {
    let detail = shortages
        .iter()
        .map(|shortage| {
            format!(
                "{}: requested {}, available {}",
                shortage.product_name, shortage.requested, shortage.available
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    StatusError::conflict()
        .brief("Not enough stock; the cart has been adjusted")
        .detail(detail)
}

#[cfg(test)]
mod tests {
    use cables_shop_app::domain::{catalog::records::ProductUuid, orders::records::OrderStatus};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn shortage_detail_lists_every_product() {
        let shortages = [
            StockShortage {
                product_uuid: ProductUuid::new(),
                product_name: "HDMI 2m".to_string(),
                requested: 3,
                available: 2,
            },
            StockShortage {
                product_uuid: ProductUuid::new(),
                product_name: "USB-C 1m".to_string(),
                requested: 1,
                available: 0,
            },
        ];

        let error = insufficient_stock(&shortages);

        assert_eq!(
            error.detail.as_deref(),
            Some("HDMI 2m: requested 3, available 2; USB-C 1m: requested 1, available 0")
        );
    }

    #[test]
    fn placed_order_is_a_conflict() {
        let error = into_status_error(CheckoutServiceError::InvalidTransition {
            from: OrderStatus::Accepted,
        });

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "Order is already accepted");
    }
}

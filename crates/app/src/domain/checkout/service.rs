//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        addresses::repository::PgAddressesRepository,
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        checkout::{data::CheckoutForm, errors::CheckoutServiceError},
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            data::OrderPlacement,
            pricing,
            records::{OrderStatus, OrderUuid},
            repositories::{PgLineItemsRepository, PgOrdersRepository},
        },
    },
    settings::ShopSettings,
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    settings: ShopSettings,
    orders: PgOrdersRepository,
    items: PgLineItemsRepository,
    catalog: PgCatalogRepository,
    customers: PgCustomersRepository,
    addresses: PgAddressesRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, settings: ShopSettings) -> Self {
        Self {
            db,
            settings,
            orders: PgOrdersRepository::new(),
            items: PgLineItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
            customers: PgCustomersRepository::new(),
            addresses: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.place_order",
        skip(self, customer, form),
        fields(
            customer_uuid = %customer,
            delivery_type = form.delivery_type.as_str(),
            line_count = tracing::field::Empty,
            total_price = tracing::field::Empty,
            order_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        customer: CustomerUuid,
        form: CheckoutForm,
    ) -> Result<OrderUuid, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .orders
            .lock_cart(&mut tx, customer)
            .await?
            .ok_or(CheckoutServiceError::EmptyCart)?;

        if !cart.status.can_transition_to(OrderStatus::Accepted) {
            return Err(CheckoutServiceError::InvalidTransition { from: cart.status });
        }

        let items = self.items.list_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let span = Span::current();

        span.record("line_count", items.len());

        self.customers
            .lock_customer(&mut tx, customer)
            .await?
            .ok_or(CheckoutServiceError::NotFound)?;

        self.customers
            .update_contact(&mut tx, customer, form.contact.normalized())
            .await?;

        // Stock is read under the product locks and stays locked until commit,
        // so the decrement below sees exactly what was validated.
        let product_uuids: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();

        let stock: FxHashMap<ProductUuid, u32> = self
            .catalog
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product.units_in_stock))
            .collect();

        if !pricing::is_cart_fully_in_stock(&items, &stock) {
            return Err(CheckoutServiceError::InsufficientStock {
                shortages: pricing::stock_shortages(&items, &stock),
            });
        }

        let (shipping_address_uuid, delivery_price) = if form.delivery_type.requires_address() {
            let address = form
                .address
                .filter(|address| address.is_deliverable())
                .ok_or(CheckoutServiceError::MissingShippingAddress)?;

            let address = self
                .addresses
                .set_primary(&mut tx, customer, &address)
                .await?;

            (Some(address.uuid), self.settings.delivery_price)
        } else {
            (None, 0)
        };

        let total_price = pricing::order_total_price(&items, form.delivery_type, delivery_price)?;

        for item in &items {
            self.catalog
                .decrement_stock(&mut tx, item.product_uuid, item.quantity)
                .await?;
        }

        self.items.freeze_prices(&mut tx, cart.uuid).await?;

        let placed = self
            .orders
            .place_order(
                &mut tx,
                cart.uuid,
                OrderPlacement {
                    delivery_type: form.delivery_type,
                    shipping_address_uuid,
                    delivery_price,
                },
            )
            .await?;

        self.addresses.delete_incomplete(&mut tx, customer).await?;

        tx.commit().await?;

        span.record("order_uuid", tracing::field::display(placed.uuid));
        span.record("total_price", total_price);

        info!(delivery_price, total_price, "order placed");

        Ok(placed.uuid)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the customer's cart into an accepted order.
    ///
    /// Contact details are saved, stock is validated against the live counts
    /// and decremented, prices and the delivery surcharge are frozen, and the
    /// shipping address (delivery only) becomes the customer's primary one.
    /// Everything happens in one transaction: on any error nothing changes.
    async fn checkout(
        &self,
        customer: CustomerUuid,
        form: CheckoutForm,
    ) -> Result<OrderUuid, CheckoutServiceError>;
}

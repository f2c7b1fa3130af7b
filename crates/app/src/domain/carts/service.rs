//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartAction, CartSummary},
            errors::CartsServiceError,
        },
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        customers::records::CustomerUuid,
        orders::{
            records::{OrderRecord, OrderUuid},
            repositories::{PgLineItemsRepository, PgOrdersRepository},
        },
    },
    settings::ShopSettings,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    settings: ShopSettings,
    orders: PgOrdersRepository,
    items: PgLineItemsRepository,
    catalog: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, settings: ShopSettings) -> Self {
        Self {
            db,
            settings,
            orders: PgOrdersRepository::new(),
            items: PgLineItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    /// Get-or-create the customer's cart and lock it.
    ///
    /// The insert is a no-op when a cart exists (or another transaction is
    /// creating one, in which case it waits for that transaction). The
    /// follow-up `SELECT ... FOR UPDATE` runs on a fresh snapshot and sees
    /// whichever row won.
    ///
    /// A cart locked by a concurrent checkout still blocks the insert; once
    /// that checkout commits the row is no longer `in_cart` and the lock comes
    /// back empty. A second attempt then creates the replacement cart.
    async fn lock_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<OrderRecord, CartsServiceError> {
        for _ in 0..2 {
            self.orders.create_cart_if_absent(tx, customer).await?;

            if let Some(cart) = self.orders.lock_cart(tx, customer).await? {
                return Ok(cart);
            }
        }

        Err(CartsServiceError::NotFound)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_active_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<OrderUuid, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_or_create_cart(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(cart.uuid)
    }

    async fn apply_cart_action(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        action: CartAction,
    ) -> Result<u32, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_or_create_cart(&mut tx, customer).await?;

        let product = self
            .catalog
            .find_product(&mut tx, product)
            .await?
            .filter(|record| record.for_sale || action != CartAction::Increment)
            .ok_or(CartsServiceError::ProductNotFound)?;

        let quantity = self
            .items
            .get_quantity(&mut tx, cart.uuid, product.uuid)
            .await?
            .unwrap_or(0);

        let quantity = action.apply(quantity, product.units_in_stock);

        if quantity == 0 {
            self.items
                .delete_item(&mut tx, cart.uuid, product.uuid)
                .await?;
        } else {
            self.items
                .upsert_quantity(&mut tx, cart.uuid, product.uuid, quantity)
                .await?;
        }

        tx.commit().await?;

        Ok(quantity)
    }

    async fn cart_summary(&self, customer: CustomerUuid) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.orders.find_cart(&mut tx, customer).await? else {
            return Ok(CartSummary {
                delivery_price: self.settings.delivery_price,
                ..CartSummary::default()
            });
        };

        let items = self.items.list_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CartSummary::from_items(
            cart.uuid,
            &items,
            cart.delivery_type,
            self.settings.delivery_price,
        )?)
    }

    async fn cart_item_count(
        &self,
        customer: Option<CustomerUuid>,
    ) -> Result<u64, CartsServiceError> {
        let Some(customer) = customer else {
            return Ok(0);
        };

        let mut tx = self.db.begin().await?;

        let count = self.items.cart_quantity(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(count)
    }

    #[tracing::instrument(name = "carts.reconcile", skip(self, customer), fields(customer_uuid = %customer), err)]
    async fn reconcile_cart(&self, customer: CustomerUuid) -> Result<usize, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.orders.lock_cart(&mut tx, customer).await? else {
            return Ok(0);
        };

        let items = self.items.list_items(&mut tx, cart.uuid).await?;

        let product_uuids: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();

        let stock: FxHashMap<ProductUuid, u32> = self
            .catalog
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product.units_in_stock))
            .collect();

        let mut adjusted = 0;

        for item in &items {
            let available = stock.get(&item.product_uuid).copied().unwrap_or(0);

            if item.quantity <= available {
                continue;
            }

            if available == 0 {
                self.items
                    .delete_item(&mut tx, cart.uuid, item.product_uuid)
                    .await?;
            } else {
                self.items
                    .upsert_quantity(&mut tx, cart.uuid, item.product_uuid, available)
                    .await?;
            }

            adjusted += 1;
        }

        tx.commit().await?;

        if adjusted > 0 {
            info!(adjusted, "cart lines clamped to stock");
        }

        Ok(adjusted)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Returns the customer's cart, creating an empty one when none exists.
    /// Concurrent callers always observe the same cart.
    async fn get_or_create_active_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<OrderUuid, CartsServiceError>;

    /// Apply `action` to the product's line in the customer's cart and return
    /// the resulting quantity (0 when the line was removed).
    async fn apply_cart_action(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        action: CartAction,
    ) -> Result<u32, CartsServiceError>;

    /// Summarise the customer's cart at live prices.
    async fn cart_summary(&self, customer: CustomerUuid) -> Result<CartSummary, CartsServiceError>;

    /// Total units in the cart; 0 for anonymous visitors or without a cart.
    async fn cart_item_count(
        &self,
        customer: Option<CustomerUuid>,
    ) -> Result<u64, CartsServiceError>;

    /// Clamp every over-requested line to current stock, removing lines whose
    /// product is sold out. Returns how many lines changed.
    async fn reconcile_cart(&self, customer: CustomerUuid) -> Result<usize, CartsServiceError>;
}

//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        orders::{
            data::PlacedOrder,
            errors::OrdersServiceError,
            pricing,
            records::{LineItemRecord, OrderRecord, OrderUuid},
            repositories::{PgLineItemsRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgLineItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgLineItemsRepository::new(),
        }
    }
}

fn placed_order(
    order: OrderRecord,
    items: Vec<LineItemRecord>,
) -> Result<PlacedOrder, OrdersServiceError> {
    let products_total = pricing::products_total_price(&items)?;
    let total_price = pricing::order_total_price(
        &items,
        order.delivery_type,
        order.delivery_price.unwrap_or_default(),
    )?;

    Ok(PlacedOrder {
        order,
        items,
        products_total,
        total_price,
    })
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PlacedOrder>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_placed(&mut tx, customer).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items_by_order: FxHashMap<OrderUuid, Vec<LineItemRecord>> = FxHashMap::default();

        for item in self.items.list_items_for_orders(&mut tx, &uuids).await? {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        tx.commit().await?;

        orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.uuid).unwrap_or_default();

                placed_order(order, items)
            })
            .collect()
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .find_placed(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let items = self.items.list_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        placed_order(order, items)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves the customer's placed orders, newest first. The cart is never
    /// included.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PlacedOrder>, OrdersServiceError>;

    /// Retrieve one placed order belonging to the customer.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<PlacedOrder, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            checkout::{CheckoutService, data::CheckoutForm},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn list_orders_returns_placed_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("history@example.com").await?;
        let product = ctx.create_stocked_product("Coax 5m", 400, 10).await?;

        ctx.add_to_cart(customer.uuid, product.uuid, 1).await?;
        let older = ctx
            .checkout
            .checkout(customer.uuid, CheckoutForm::default())
            .await?;

        ctx.add_to_cart(customer.uuid, product.uuid, 2).await?;
        let newer = ctx
            .checkout
            .checkout(customer.uuid, CheckoutForm::default())
            .await?;

        ctx.add_to_cart(customer.uuid, product.uuid, 1).await?;

        let orders = ctx.orders.list_orders(customer.uuid).await?;

        assert_eq!(
            orders.iter().map(|o| o.order.uuid).collect::<Vec<_>>(),
            vec![newer, older],
            "the open cart must not be listed"
        );
        assert_eq!(
            orders.iter().map(|o| o.products_total).collect::<Vec<_>>(),
            vec![800, 400]
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_of_another_customer_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_customer("owner@example.com").await?;
        let stranger = ctx.create_customer("stranger@example.com").await?;
        let product = ctx.create_stocked_product("Coax 1m", 200, 10).await?;

        ctx.add_to_cart(owner.uuid, product.uuid, 1).await?;
        let order = ctx
            .checkout
            .checkout(owner.uuid, CheckoutForm::default())
            .await?;

        let result = ctx.orders.get_order(stranger.uuid, order).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_does_not_expose_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("peek@example.com").await?;

        let cart = ctx.carts.get_or_create_active_cart(customer.uuid).await?;

        let result = ctx.orders.get_order(customer.uuid, cart).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}

//! Line Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_count},
    domain::{
        catalog::records::ProductUuid,
        customers::records::CustomerUuid,
        orders::records::{LineItemRecord, LineItemUuid, OrderUuid},
    },
};

const LIST_LINE_ITEMS_SQL: &str = include_str!("../sql/list_line_items.sql");
const GET_LINE_QUANTITY_SQL: &str = include_str!("../sql/get_line_quantity.sql");
const UPSERT_LINE_ITEM_SQL: &str = include_str!("../sql/upsert_line_item.sql");
const DELETE_LINE_ITEM_SQL: &str = include_str!("../sql/delete_line_item.sql");
const FREEZE_LINE_PRICES_SQL: &str = include_str!("../sql/freeze_line_prices.sql");
const CART_QUANTITY_FOR_CUSTOMER_SQL: &str =
    include_str!("../sql/cart_quantity_for_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLineItemsRepository;

impl PgLineItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<LineItemRecord>, sqlx::Error> {
        self.list_items_for_orders(tx, &[order]).await
    }

    /// Line items of several orders in one round trip, grouped by order.
    pub(crate) async fn list_items_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<LineItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, LineItemRecord>(LIST_LINE_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        let quantity: Option<i64> = query_scalar(GET_LINE_QUANTITY_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        quantity
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })
    }

    /// Set the quantity of a line, inserting it when absent.
    pub(crate) async fn upsert_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_LINE_ITEM_SQL)
            .bind(LineItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_ITEM_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Copy each product's current price onto its line.
    pub(crate) async fn freeze_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(FREEZE_LINE_PRICES_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Sum of quantities in the customer's cart; 0 without a cart.
    pub(crate) async fn cart_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(CART_QUANTITY_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_quantity".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LineItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: LineItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            units_in_stock: try_get_count(row, "units_in_stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

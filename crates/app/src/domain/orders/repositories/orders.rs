//! Orders Repository

use std::error::Error;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, try_get_optional_amount},
    domain::{
        addresses::records::AddressUuid,
        customers::records::CustomerUuid,
        orders::{
            data::OrderPlacement,
            records::{OrderRecord, OrderUuid},
        },
    },
};

const CREATE_CART_IF_ABSENT_SQL: &str = include_str!("../sql/create_cart_if_absent.sql");
const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const PLACE_ORDER_SQL: &str = include_str!("../sql/place_order.sql");
const LIST_PLACED_ORDERS_SQL: &str = include_str!("../sql/list_placed_orders.sql");
const GET_PLACED_ORDER_SQL: &str = include_str!("../sql/get_placed_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an empty cart unless the customer already has one.
    ///
    /// Returns the number of rows inserted (0 or 1). The partial unique index
    /// on `customer_uuid WHERE status = 'in_cart'` resolves concurrent callers.
    pub(crate) async fn create_cart_if_absent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_CART_IF_ABSENT_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(FIND_CART_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read the customer's cart and hold its row lock until the transaction
    /// ends. Every cart mutation goes through this lock.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_CART_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        placement: OrderPlacement,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(PLACE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(placement.delivery_type.as_str())
            .bind(placement.shipping_address_uuid.map(AddressUuid::into_uuid))
            .bind(amount_to_i64(placement.delivery_price, "delivery_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_placed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_PLACED_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_placed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_PLACED_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

fn decode_error(col: &str, error: impl Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let delivery_type: String = row.try_get("delivery_type")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            status: status.parse().map_err(|e| decode_error("status", e))?,
            delivery_type: delivery_type
                .parse()
                .map_err(|e| decode_error("delivery_type", e))?,
            shipping_address_uuid: row
                .try_get::<Option<Uuid>, _>("shipping_address_uuid")?
                .map(AddressUuid::from_uuid),
            delivery_price: try_get_optional_amount(row, "delivery_price")?,
            placed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("placed_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

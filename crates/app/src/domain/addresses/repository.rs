//! Shipping Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    addresses::{
        data::AddressInput,
        records::{AddressRecord, AddressUuid},
    },
    customers::records::CustomerUuid,
};

const GET_PRIMARY_ADDRESS_SQL: &str = include_str!("sql/get_primary_address.sql");
const CLEAR_PRIMARY_ADDRESS_SQL: &str = include_str!("sql/clear_primary_address.sql");
const UPSERT_PRIMARY_ADDRESS_SQL: &str = include_str!("sql/upsert_primary_address.sql");
const DELETE_INCOMPLETE_ADDRESSES_SQL: &str = include_str!("sql/delete_incomplete_addresses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_primary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_PRIMARY_ADDRESS_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Make `input` the customer's only primary address.
    ///
    /// The flag is cleared on every sibling first, then the address is matched
    /// by content (or inserted) and flagged. Callers must hold the customer row
    /// lock so two writers cannot interleave between the two statements.
    pub(crate) async fn set_primary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        input: &AddressInput,
    ) -> Result<AddressRecord, sqlx::Error> {
        query(CLEAR_PRIMARY_ADDRESS_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?;

        let input = input.trimmed();

        query_as::<Postgres, AddressRecord>(UPSERT_PRIMARY_ADDRESS_SQL)
            .bind(AddressUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(input.address)
            .bind(input.city)
            .bind(input.region)
            .bind(input.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove leftovers of abandoned checkouts: non-primary rows missing a
    /// street or city that no order points at.
    pub(crate) async fn delete_incomplete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_INCOMPLETE_ADDRESSES_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            region: row.try_get("region")?,
            postal_code: row.try_get("postal_code")?,
            is_primary: row.try_get("is_primary")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn input(address: &str, city: &str) -> AddressInput {
        AddressInput {
            address: address.to_string(),
            city: city.to_string(),
            region: String::new(),
            postal_code: String::new(),
        }
    }

    #[tokio::test]
    async fn set_primary_keeps_a_single_primary() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("primary@example.com").await?;
        let repository = PgAddressesRepository::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        let first = repository
            .set_primary(&mut tx, customer.uuid, &input("1 Main St", "Springfield"))
            .await?;
        let second = repository
            .set_primary(&mut tx, customer.uuid, &input("2 Side St", "Springfield"))
            .await?;
        let again = repository
            .set_primary(&mut tx, customer.uuid, &input(" 1 Main St ", "Springfield"))
            .await?;

        assert_ne!(first.uuid, second.uuid, "distinct content is a new row");
        assert_eq!(first.uuid, again.uuid, "matching content reuses the row");

        let primary = repository
            .get_primary(&mut tx, customer.uuid)
            .await?
            .ok_or("expected a primary address")?;

        assert_eq!(primary.uuid, first.uuid);

        let primaries: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shipping_addresses WHERE customer_uuid = $1 AND is_primary",
        )
        .bind(customer.uuid.into_uuid())
        .fetch_one(&mut *tx)
        .await?;

        assert_eq!(primaries, 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_incomplete_spares_primary_and_complete_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("cleanup@example.com").await?;
        let repository = PgAddressesRepository::new();
        let mut tx = ctx.db.begin_test_transaction().await;

        repository
            .set_primary(&mut tx, customer.uuid, &input("", "Springfield"))
            .await?;
        repository
            .set_primary(&mut tx, customer.uuid, &input("3 Elm St", "Springfield"))
            .await?;
        repository
            .set_primary(&mut tx, customer.uuid, &input("4 Oak St", "Springfield"))
            .await?;

        let deleted = repository.delete_incomplete(&mut tx, customer.uuid).await?;

        assert_eq!(deleted, 1, "only the blank-street row goes");

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM shipping_addresses WHERE customer_uuid = $1")
                .bind(customer.uuid.into_uuid())
                .fetch_one(&mut *tx)
                .await?;

        assert_eq!(remaining, 2);

        Ok(())
    }
}

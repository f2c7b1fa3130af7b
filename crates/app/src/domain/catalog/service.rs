//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCategory, NewProduct},
        errors::CatalogServiceError,
        records::{CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_products(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, category).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn restock_product(
        &self,
        product: ProductUuid,
        units: u32,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let restocked = self
            .repository
            .restock_product(&mut tx, product, units)
            .await?;

        tx.commit().await?;

        Ok(restocked)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Creates a category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Retrieves products that are for sale, optionally narrowed to one category.
    async fn list_products(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single product, whether or not it is for sale.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a product in an existing category.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Adds `units` to a product's stock.
    async fn restock_product(
        &self,
        product: ProductUuid,
        units: u32,
    ) -> Result<ProductRecord, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Patch cord").await?;

        let uuid = ProductUuid::new();

        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid,
                category_uuid: category.uuid,
                name: "Patch cord 2m".to_string(),
                slug: "patch-cord-2m".to_string(),
                description: Some("Cat6 patch cord".to_string()),
                length_cm: 200,
                price: 45_000,
                units_in_stock: 7,
                for_sale: true,
                photo: None,
            })
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.category_uuid, category.uuid);
        assert_eq!(product.length_cm, 200);
        assert_eq!(product.price, 45_000);
        assert_eq!(product.units_in_stock, 7);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_in_unknown_category_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                category_uuid: CategoryUuid::new(),
                name: "Orphan".to_string(),
                slug: "orphan".to_string(),
                description: None,
                length_cm: 100,
                price: 1,
                units_in_stock: 0,
                for_sale: true,
                photo: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_category_name_is_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_category("HDMI").await?;

        let result = ctx.create_category("HDMI").await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_hides_products_not_for_sale() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("USB").await?;

        let visible = ctx.create_product(category.uuid, "USB-C 1m", 1_000, 3).await?;
        let hidden = ctx.create_product(category.uuid, "USB-C 3m", 2_000, 3).await?;

        sqlx::query("UPDATE products SET for_sale = FALSE WHERE uuid = $1")
            .bind(hidden.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let products = ctx.catalog.list_products(None).await?;

        assert_eq!(products.len(), 1, "only for-sale products should be listed");
        assert_eq!(products.first().map(|p| p.uuid), Some(visible.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;
        let hdmi = ctx.create_category("HDMI").await?;
        let usb = ctx.create_category("USB").await?;

        ctx.create_product(hdmi.uuid, "HDMI 2m", 1_500, 1).await?;
        let usb_cable = ctx.create_product(usb.uuid, "USB-A 1m", 500, 1).await?;

        let products = ctx.catalog.list_products(Some(usb.uuid)).await?;

        assert_eq!(
            products.iter().map(|p| p.uuid).collect::<Vec<_>>(),
            vec![usb_cable.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn restock_product_adds_units() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Optical").await?;
        let product = ctx.create_product(category.uuid, "Toslink", 900, 2).await?;

        let restocked = ctx.catalog.restock_product(product.uuid, 5).await?;

        assert_eq!(restocked.units_in_stock, 7);

        Ok(())
    }

    #[tokio::test]
    async fn restock_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.restock_product(ProductUuid::new(), 5).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::catalog::records::CategoryRecord;

use crate::{extensions::*, state::State};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub name_plural: String,
    pub slug: String,
    pub description: Option<String>,
    pub photo: Option<String>,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
            name_plural: category.name_plural,
            slug: category.slug,
            description: category.description,
            photo: category.photo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Lists every cable category, ordered by name.
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .or_500("failed to fetch categories")?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cables_shop_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, records::CategoryUuid,
    };

    use crate::test_helpers::catalog_service;

    use super::*;

    fn make_category(name: &str) -> CategoryRecord {
        CategoryRecord {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            name_plural: format!("{name} cables"),
            slug: name.to_lowercase(),
            description: None,
            photo: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_categories() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![make_category("HDMI"), make_category("USB")]));

        let response: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        let names: Vec<&str> = response
            .categories
            .iter()
            .map(|category| category.name.as_str())
            .collect();

        assert_eq!(names, ["HDMI", "USB"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_categories()
            .once()
            .return_once(|| Err(CatalogServiceError::InvalidData));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

//! Catalog Data

use crate::domain::catalog::records::{CategoryUuid, ProductUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub name_plural: String,
    pub slug: String,
    pub description: Option<String>,
    pub photo: Option<String>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub length_cm: u32,
    pub price: u64,
    pub units_in_stock: u32,
    pub for_sale: bool,
    pub photo: Option<String>,
}

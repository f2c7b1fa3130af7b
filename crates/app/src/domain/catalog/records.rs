//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category (cable type) Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub name_plural: String,
    pub slug: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product (cable) Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

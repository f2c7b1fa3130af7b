//! Product Handlers

pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
pub(super) mod tests {
    use jiff::Timestamp;

    use cables_shop_app::domain::catalog::records::{CategoryUuid, ProductRecord, ProductUuid};

    pub(crate) fn make_product(uuid: ProductUuid, price: u64, units_in_stock: u32) -> ProductRecord {
        ProductRecord {
            uuid,
            category_uuid: CategoryUuid::new(),
            name: "HDMI 2m".to_string(),
            slug: "hdmi-2m".to_string(),
            description: None,
            length_cm: 200,
            price,
            units_in_stock,
            for_sale: true,
            photo: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}

//! Order pricing and stock checks.
//!
//! Pure functions over line items; nothing here touches the database.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::domain::{
    catalog::records::ProductUuid,
    orders::{
        data::StockShortage,
        records::{DeliveryType, LineItemRecord},
    },
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("order amount overflow")]
pub struct AmountOverflow;

/// `quantity * unit_price` for a single line.
///
/// # Errors
///
/// Returns [`AmountOverflow`] when the product does not fit in a `u64`.
pub fn line_total(item: &LineItemRecord) -> Result<u64, AmountOverflow> {
    item.unit_price
        .checked_mul(u64::from(item.quantity))
        .ok_or(AmountOverflow)
}

/// Sum of every line total, without delivery.
///
/// # Errors
///
/// Returns [`AmountOverflow`] when the sum does not fit in a `u64`.
pub fn products_total_price(items: &[LineItemRecord]) -> Result<u64, AmountOverflow> {
    items.iter().try_fold(0u64, |total, item| {
        total.checked_add(line_total(item)?).ok_or(AmountOverflow)
    })
}

/// Products total plus the delivery surcharge when the order is delivered.
///
/// # Errors
///
/// Returns [`AmountOverflow`] when the total does not fit in a `u64`.
pub fn order_total_price(
    items: &[LineItemRecord],
    delivery_type: DeliveryType,
    delivery_price: u64,
) -> Result<u64, AmountOverflow> {
    let products_total = products_total_price(items)?;

    match delivery_type {
        DeliveryType::Delivery => products_total
            .checked_add(delivery_price)
            .ok_or(AmountOverflow),
        DeliveryType::PickUp => Ok(products_total),
    }
}

/// Number of distinct line items.
#[must_use]
pub fn order_total_line_items(items: &[LineItemRecord]) -> usize {
    items.len()
}

/// Sum of quantities, as shown on the cart badge.
#[must_use]
pub fn total_quantity(items: &[LineItemRecord]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Lines whose quantity exceeds current stock. Products missing from `stock`
/// count as having none left.
#[must_use]
pub fn stock_shortages(
    items: &[LineItemRecord],
    stock: &FxHashMap<ProductUuid, u32>,
) -> Vec<StockShortage> {
    items
        .iter()
        .filter_map(|item| {
            let available = stock.get(&item.product_uuid).copied().unwrap_or(0);

            (item.quantity > available).then(|| StockShortage {
                product_uuid: item.product_uuid,
                product_name: item.product_name.clone(),
                requested: item.quantity,
                available,
            })
        })
        .collect()
}

#[must_use]
pub fn is_cart_fully_in_stock(
    items: &[LineItemRecord],
    stock: &FxHashMap<ProductUuid, u32>,
) -> bool {
    items.iter().all(|item| {
        stock
            .get(&item.product_uuid)
            .is_some_and(|available| item.quantity <= *available)
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::orders::records::{LineItemUuid, OrderUuid};

    use super::*;

    fn item(product: ProductUuid, quantity: u32, unit_price: u64) -> LineItemRecord {
        LineItemRecord {
            uuid: LineItemUuid::new(),
            order_uuid: OrderUuid::new(),
            product_uuid: product,
            product_name: "cable".to_string(),
            quantity,
            unit_price,
            units_in_stock: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn totals_sum_quantity_times_price() -> Result<(), AmountOverflow> {
        let items = [
            item(ProductUuid::new(), 3, 100),
            item(ProductUuid::new(), 2, 300),
        ];

        assert_eq!(products_total_price(&items)?, 900);
        assert_eq!(order_total_price(&items, DeliveryType::PickUp, 500)?, 900);
        assert_eq!(order_total_price(&items, DeliveryType::Delivery, 500)?, 1_400);
        assert_eq!(order_total_line_items(&items), 2);
        assert_eq!(total_quantity(&items), 5);

        Ok(())
    }

    #[test]
    fn empty_order_costs_nothing_unless_delivered() -> Result<(), AmountOverflow> {
        assert_eq!(products_total_price(&[])?, 0);
        assert_eq!(order_total_price(&[], DeliveryType::Delivery, 500)?, 500);

        Ok(())
    }

    #[test]
    fn overflow_is_reported() {
        let items = [item(ProductUuid::new(), 2, u64::MAX)];

        assert_eq!(products_total_price(&items), Err(AmountOverflow));

        let items = [item(ProductUuid::new(), 1, u64::MAX)];

        assert_eq!(
            order_total_price(&items, DeliveryType::Delivery, 1),
            Err(AmountOverflow)
        );
    }

    #[test]
    fn shortages_list_only_over_requested_lines() {
        let enough = ProductUuid::new();
        let short = ProductUuid::new();
        let gone = ProductUuid::new();

        let items = [item(enough, 2, 1), item(short, 5, 1), item(gone, 1, 1)];

        let mut stock = FxHashMap::default();
        stock.insert(enough, 2);
        stock.insert(short, 3);

        let shortages = stock_shortages(&items, &stock);

        assert_eq!(
            shortages
                .iter()
                .map(|s| (s.product_uuid, s.requested, s.available))
                .collect::<Vec<_>>(),
            vec![(short, 5, 3), (gone, 1, 0)]
        );
        assert!(!is_cart_fully_in_stock(&items, &stock));
    }

    #[test]
    fn cart_within_stock_is_fully_in_stock() {
        let product = ProductUuid::new();
        let items = [item(product, 4, 1)];

        let mut stock = FxHashMap::default();
        stock.insert(product, 4);

        assert!(is_cart_fully_in_stock(&items, &stock));
        assert!(stock_shortages(&items, &stock).is_empty());
        assert!(is_cart_fully_in_stock(&[], &FxHashMap::default()));
    }
}

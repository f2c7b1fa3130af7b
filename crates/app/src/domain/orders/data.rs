//! Order Data

use crate::domain::{
    addresses::records::AddressUuid,
    catalog::records::ProductUuid,
    orders::records::{DeliveryType, LineItemRecord, OrderRecord},
};

/// A line item asking for more units than are in stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortage {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub requested: u32,
    pub available: u32,
}

/// Delivery details stamped on a cart when it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPlacement {
    pub delivery_type: DeliveryType,
    pub shipping_address_uuid: Option<AddressUuid>,
    pub delivery_price: u64,
}

/// A placed order with its line items and frozen totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: OrderRecord,
    pub items: Vec<LineItemRecord>,
    pub products_total: u64,
    pub total_price: u64,
}

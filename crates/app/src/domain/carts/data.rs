//! Cart Data

use std::str::FromStr;

use crate::domain::{
    carts::errors::CartsServiceError,
    catalog::records::ProductUuid,
    orders::{
        pricing::{self, AmountOverflow},
        records::{DeliveryType, LineItemRecord, OrderUuid},
    },
};

/// A change to one line of the cart, as sent by the cart buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increment,
    Decrement,
    Clear,
}

impl CartAction {
    /// The line quantity after applying this action.
    ///
    /// Incrementing never goes past the units in stock. Decrementing and
    /// clearing are unconditional; a result of zero means the line is removed.
    #[must_use]
    pub fn apply(self, quantity: u32, units_in_stock: u32) -> u32 {
        match self {
            Self::Increment if quantity < units_in_stock => quantity + 1,
            Self::Increment => quantity,
            Self::Decrement => quantity.saturating_sub(1),
            Self::Clear => 0,
        }
    }
}

impl FromStr for CartAction {
    type Err = CartsServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_to_cart" | "increment" => Ok(Self::Increment),
            "remove_from_cart" | "decrement" => Ok(Self::Decrement),
            "delete_from_cart" | "clear" => Ok(Self::Clear),
            _ => Err(CartsServiceError::InvalidRequest),
        }
    }
}

/// One line of the cart summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
    pub units_in_stock: u32,
}

/// Everything the cart and checkout pages display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSummary {
    /// `None` when the customer has no cart yet.
    pub order_uuid: Option<OrderUuid>,
    pub lines: Vec<CartLine>,
    pub products_total: u64,
    /// Flat surcharge applied when the order is delivered.
    pub delivery_price: u64,
    pub total_price: u64,
    pub line_count: usize,
    pub total_quantity: u64,
}

impl CartSummary {
    /// Summarise a cart's line items at live prices.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] when a total does not fit in a `u64`.
    pub fn from_items(
        order_uuid: OrderUuid,
        items: &[LineItemRecord],
        delivery_type: DeliveryType,
        delivery_price: u64,
    ) -> Result<Self, AmountOverflow> {
        let lines = items
            .iter()
            .map(|item| {
                Ok(CartLine {
                    product_uuid: item.product_uuid,
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: pricing::line_total(item)?,
                    units_in_stock: item.units_in_stock,
                })
            })
            .collect::<Result<Vec<_>, AmountOverflow>>()?;

        Ok(Self {
            order_uuid: Some(order_uuid),
            lines,
            products_total: pricing::products_total_price(items)?,
            delivery_price,
            total_price: pricing::order_total_price(items, delivery_type, delivery_price)?,
            line_count: pricing::order_total_line_items(items),
            total_quantity: pricing::total_quantity(items),
        })
    }
}

//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        addresses::records::AddressUuid, catalog::records::ProductUuid,
        customers::records::CustomerUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Line Item UUID
pub type LineItemUuid = TypedUuid<LineItemRecord>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown delivery type: {0}")]
pub struct UnknownDeliveryType(pub String);

/// Lifecycle of an order. A cart is an order in [`OrderStatus::InCart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    #[default]
    InCart,
    Accepted,
    Preparing,
    Shipped,
    Complete,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InCart => "in_cart",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::Shipped => "shipped",
            Self::Complete => "complete",
        }
    }

    /// Transitions only move forward. A cart can only become `Accepted`
    /// (checkout); after that `Preparing` and `Shipped` are optional stops on
    /// the way to `Complete`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::InCart => next == Self::Accepted,
            _ => next > self,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_cart" => Ok(Self::InCart),
            "accepted" => Ok(Self::Accepted),
            "preparing" => Ok(Self::Preparing),
            "shipped" => Ok(Self::Shipped),
            "complete" => Ok(Self::Complete),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// How a placed order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeliveryType {
    #[default]
    PickUp,
    Delivery,
}

impl DeliveryType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PickUp => "pick_up",
            Self::Delivery => "delivery",
        }
    }

    #[must_use]
    pub const fn requires_address(self) -> bool {
        matches!(self, Self::Delivery)
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the stored names as well as the checkout form's radio values
/// (`delivery`, `selfPickUp`).
impl FromStr for DeliveryType {
    type Err = UnknownDeliveryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "pick_up" | "pickup" | "selfPickUp" => Ok(Self::PickUp),
            other => Err(UnknownDeliveryType(other.to_string())),
        }
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub shipping_address_uuid: Option<AddressUuid>,
    pub delivery_price: Option<u64>,
    pub placed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Line Item Record
///
/// `unit_price` is the frozen price once the order is placed and the live
/// product price while the order is still a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRecord {
    pub uuid: LineItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub units_in_stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

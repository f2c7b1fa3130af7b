//! Checkout Data

use crate::domain::{
    addresses::data::AddressInput, customers::data::ContactDetails,
    orders::records::DeliveryType,
};

/// Checkout form as submitted by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub contact: ContactDetails,
    pub delivery_type: DeliveryType,
    /// Required, with a street and city, when `delivery_type` is
    /// [`DeliveryType::Delivery`]; ignored for pick-up.
    pub address: Option<AddressInput>,
}

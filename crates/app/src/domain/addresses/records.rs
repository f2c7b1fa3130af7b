//! Shipping Address Records

use jiff::Timestamp;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// Shipping Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Shipping Address Record
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub customer_uuid: CustomerUuid,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

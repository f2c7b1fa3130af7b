//! Contact and address payloads shared by checkout and profile.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cables_shop_app::domain::{
    addresses::{data::AddressInput, records::AddressRecord},
    customers::data::ContactDetails,
};

/// Contact Details
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Blank or absent clears the phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<ContactRequest> for ContactDetails {
    fn from(request: ContactRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        }
    }
}

/// Shipping Address
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressRequest {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub postal_code: String,
}

impl From<AddressRequest> for AddressInput {
    fn from(request: AddressRequest) -> Self {
        Self {
            address: request.address,
            city: request.city,
            region: request.region,
            postal_code: request.postal_code,
        }
    }
}

/// Stored Shipping Address
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(record: AddressRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            address: record.address,
            city: record.city,
            region: record.region,
            postal_code: record.postal_code,
        }
    }
}

//! Customer Data

use crate::domain::{
    addresses::{data::AddressInput, records::AddressRecord},
    customers::records::{CustomerRecord, CustomerUuid},
};

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Contact fields editable from the checkout and profile forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl ContactDetails {
    /// Trimmed copy; a blank phone becomes `None` so it never collides with
    /// another customer's blank phone.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: normalize_phone(self.phone.as_deref()),
        }
    }
}

pub(crate) fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .map(str::to_string)
}

/// Profile Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub contact: ContactDetails,
    pub address: Option<AddressInput>,
}

/// A customer together with their primary shipping address.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub customer: CustomerRecord,
    pub primary_address: Option<AddressRecord>,
}

//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    customers::errors::is_contact_violation,
    orders::{data::StockShortage, pricing::AmountOverflow, records::OrderStatus},
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("phone number already belongs to another customer")]
    DuplicateContact,

    #[error("not enough stock for {} product(s)", shortages.len())]
    InsufficientStock { shortages: Vec<StockShortage> },

    #[error("delivery requires a street and city")]
    MissingShippingAddress,

    #[error("an order in status {from} cannot be placed")]
    InvalidTransition { from: OrderStatus },

    #[error("customer not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_contact_violation(&error) {
            return Self::DuplicateContact;
        }

        if matches!(error, Error::ColumnDecode { .. }) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<AmountOverflow> for CheckoutServiceError {
    fn from(_: AmountOverflow) -> Self {
        Self::InvalidData
    }
}

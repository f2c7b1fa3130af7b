//! Customers service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

const CONTACT_CONSTRAINTS: [&str; 2] = ["customers_email_key", "customers_phone_key"];

/// Whether `error` is a unique violation on a customer's email or phone.
pub(crate) fn is_contact_violation(error: &Error) -> bool {
    error.as_database_error().is_some_and(|db_error| {
        db_error.kind() == ErrorKind::UniqueViolation
            && db_error
                .constraint()
                .is_some_and(|constraint| CONTACT_CONSTRAINTS.contains(&constraint))
    })
}

#[derive(Debug, Error)]
pub enum CustomersServiceError {
    #[error("email or phone already belongs to another customer")]
    DuplicateContact,

    #[error("customer already exists")]
    AlreadyExists,

    #[error("customer not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CustomersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_contact_violation(&error) {
            return Self::DuplicateContact;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

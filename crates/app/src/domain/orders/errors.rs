//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::orders::pricing::AmountOverflow;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::ColumnDecode { .. } => Self::InvalidData,
            other => Self::Sql(other),
        }
    }
}

impl From<AmountOverflow> for OrdersServiceError {
    fn from(_: AmountOverflow) -> Self {
        Self::InvalidData
    }
}

//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

pub(crate) trait DepotExt {
    /// Typed depot lookup; a missing value is a wiring bug, so 500.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_missing| StatusError::internal_server_error())
    }
}

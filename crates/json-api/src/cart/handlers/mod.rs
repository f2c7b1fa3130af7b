//! Cart Handlers

pub(crate) mod count;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod reconcile;
pub(crate) mod update;

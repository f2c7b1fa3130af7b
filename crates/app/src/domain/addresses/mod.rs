//! Shipping Addresses

pub mod data;
pub mod records;
pub(crate) mod repository;

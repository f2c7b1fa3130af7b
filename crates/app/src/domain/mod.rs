//! Cables Shop Domain Concerns

pub mod addresses;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod orders;

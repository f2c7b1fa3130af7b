//! Storefront domain services and persistence for the cables shop.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod settings;
pub mod uuids;

#[cfg(test)]
mod test;

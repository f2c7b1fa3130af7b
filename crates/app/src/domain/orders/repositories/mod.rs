//! Order Repositories

mod items;
mod orders;

pub(crate) use items::PgLineItemsRepository;
pub(crate) use orders::PgOrdersRepository;

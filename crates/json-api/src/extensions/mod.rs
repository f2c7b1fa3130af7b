//! Extension traits

mod customer;
mod depot;
mod result;

pub(crate) use customer::CustomerDepotExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;

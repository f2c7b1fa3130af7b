//! Customer Profile

mod errors;
mod handlers;

pub(crate) use handlers::*;

//! Shop Config

use cables_shop_app::settings::DEFAULT_DELIVERY_PRICE;
use clap::Args;

/// Pricing settings applied at checkout.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// Delivery surcharge in minor currency units
    #[arg(long, env = "DELIVERY_PRICE", default_value_t = DEFAULT_DELIVERY_PRICE)]
    pub delivery_price: u64,
}

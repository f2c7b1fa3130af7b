//! Server configuration module

use clap::Parser;

use cables_shop_app::settings::ShopSettings;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, server::ServerRuntimeConfig, shop::ShopConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod shop;

pub(crate) use logging::LogFormat;

/// Cables Shop JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "cables-shop-json", about = "Cables Shop JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Pricing settings.
    #[command(flatten)]
    pub shop: ShopConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    #[must_use]
    pub fn shop_settings(&self) -> ShopSettings {
        ShopSettings {
            delivery_price: self.shop.delivery_price,
        }
    }
}

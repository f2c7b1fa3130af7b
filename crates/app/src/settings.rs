//! Shop-wide settings shared by the services.

/// Flat delivery surcharge, in minor currency units, when none is configured.
pub const DEFAULT_DELIVERY_PRICE: u64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopSettings {
    /// Surcharge added to delivered orders, in minor currency units.
    pub delivery_price: u64,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            delivery_price: DEFAULT_DELIVERY_PRICE,
        }
    }
}

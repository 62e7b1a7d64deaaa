use std::time::Duration;

/// Public identity of the shop, shown on receipts and export artifacts.
#[derive(Debug, Clone)]
pub struct ShopInfo {
    pub name: String,
    /// Machine-friendly shop name used in export file names.
    pub slug: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
}

impl Default for ShopInfo {
    fn default() -> Self {
        Self {
            name: "Precious Moments Gift Shop".to_string(),
            slug: "precious_moments".to_string(),
            address: "House 45, Road 12, Sector 7, Uttara, Dhaka, Bangladesh".to_string(),
            phone: "+8801700000000".to_string(),
            whatsapp: "+8801700000000".to_string(),
        }
    }
}

/// Runtime settings for the storefront. `Default` carries the values the
/// shop ships with; embedders override fields as needed.
///
/// Monetary fields are in the smallest currency unit (poisha), matching the
/// `price_cents` representation used across the domain.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub shop: ShopInfo,
    /// Email the admin console accepts, compared case-insensitively.
    pub admin_email: String,
    /// Security key the admin console accepts, compared exactly.
    pub admin_security_key: String,
    /// Flat fee added to the payable amount shown at the payment step.
    pub delivery_fee_cents: i64,
    /// Order total required to earn one loyalty point.
    pub loyalty_cents_per_point: i64,
    /// Stock level below which a product counts as a low-stock alert.
    pub low_stock_threshold: i64,
    /// Simulated payment-processing latency before an order is confirmed.
    pub checkout_processing_delay: Duration,
    /// Simulated pause on the confirmation screen before the order is
    /// handed back to the caller.
    pub order_confirmation_delay: Duration,
    /// Simulated latency of the admin credential check.
    pub admin_login_delay: Duration,
    /// Simulated latency of saving a product from the admin console.
    pub admin_save_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            shop: ShopInfo::default(),
            admin_email: "provatkarmoker44@gmail.com".to_string(),
            admin_security_key: "moment@2025".to_string(),
            delivery_fee_cents: 100_00,
            loyalty_cents_per_point: 100_00,
            low_stock_threshold: 5,
            checkout_processing_delay: Duration::from_millis(2000),
            order_confirmation_delay: Duration::from_millis(2500),
            admin_login_delay: Duration::from_millis(1200),
            admin_save_delay: Duration::from_millis(1000),
        }
    }
}

impl StorefrontConfig {
    /// Default configuration with every simulated delay zeroed, for
    /// deterministic tests and embedders that drive their own pacing.
    pub fn without_simulated_delays() -> Self {
        Self {
            checkout_processing_delay: Duration::ZERO,
            order_confirmation_delay: Duration::ZERO,
            admin_login_delay: Duration::ZERO,
            admin_save_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

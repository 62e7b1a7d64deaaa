use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a placed order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    /// Order has been placed and awaits fulfilment.
    #[default]
    Pending,
    /// Order is being prepared for dispatch.
    Processing,
    /// Order has left the shop.
    Shipped,
    /// Order reached the customer.
    Delivered,
    /// Order was cancelled and should not be fulfilled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment option chosen at checkout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// Mobile wallet transfer.
    #[serde(rename = "Mobile Banking")]
    MobileBanking,
    /// Cash handed over on delivery.
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::MobileBanking => "Mobile Banking",
            Self::CashOnDelivery => "COD",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact and delivery details collected during checkout.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShippingDetails {
    /// Recipient full name.
    pub name: String,
    /// Contact email for order updates.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Full delivery address.
    pub address: String,
}

/// A placed order as it appears in the customer's history and the
/// merchant's records.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Human-friendly order reference, for example `ORD-4821`.
    pub id: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Goods total in the smallest currency unit, excluding the delivery fee.
    pub total_cents: i64,
    /// Payment option chosen at checkout.
    pub payment_method: PaymentMethod,
    /// Recipient name captured at checkout.
    pub customer_name: String,
    /// Contact email captured at checkout.
    pub customer_email: String,
    /// Contact phone captured at checkout.
    pub customer_phone: String,
    /// Delivery address captured at checkout.
    pub shipping_address: String,
    /// Names of the ordered products, one entry per cart line.
    pub product_names: Vec<String>,
    /// Total number of units across all lines.
    pub item_count: i64,
    /// Gallery image representing the order, taken from the first line.
    pub cover_url: Option<String>,
    /// Timestamp for when the order was placed.
    pub created_at: NaiveDateTime,
}

//! Payment domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Payment method accepted by the establishment, synced from upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    /// Days until the amount is actually received (card settlements).
    pub receiving_days: i32,
    /// Fee retained by the acquirer, as a percentage.
    pub receiving_fee: Decimal,
}

/// A payment recorded at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub vehicle_id: i64,
    pub payment_method_id: i64,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

/// Aggregated revenue per payment method for the day summary.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodTotal {
    pub payment_method_id: i64,
    pub payment_method_name: String,
    pub total: Decimal,
}

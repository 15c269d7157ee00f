//! Vehicle session domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A vehicle's stay in the lot.
///
/// Created at check-in with an open exit; mutated exactly once at checkout,
/// when the exit instant is fixed, the amount frozen and the payment method
/// attached. Rows are only removed by the bulk local reset that accompanies
/// closing the work session.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub model: String,
    pub color: String,
    pub price_table_id: i64,
    /// Display name of the price table, resolved by the repository.
    pub price_table_name: Option<String>,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    pub amount_due: Option<Decimal>,
    pub payment_method_id: Option<i64>,
    pub in_lot: bool,
}

/// Check-in data before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub model: String,
    pub color: String,
    pub price_table_id: i64,
    pub entry_at: DateTime<Utc>,
}

impl Vehicle {
    /// Apply the checkout mutation: fix the exit, freeze the amount,
    /// attach the payment method.
    pub fn checked_out(
        mut self,
        exit_at: DateTime<Utc>,
        amount_due: Decimal,
        payment_method_id: i64,
    ) -> Self {
        self.exit_at = Some(exit_at);
        self.amount_due = Some(amount_due);
        self.payment_method_id = Some(payment_method_id);
        self.in_lot = false;
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

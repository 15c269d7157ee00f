//! Payment and payment-method repository interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{Payment, PaymentMethod, PaymentMethodTotal};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PaymentMethod>>;
    async fn find_all(&self) -> DomainResult<Vec<PaymentMethod>>;
    /// Replace the whole local set with the freshly synced methods.
    async fn replace_all(&self, methods: Vec<PaymentMethod>) -> DomainResult<()>;
    async fn delete_all(&self) -> DomainResult<()>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(
        &self,
        vehicle_id: i64,
        payment_method_id: i64,
        amount: Decimal,
        paid_at: DateTime<Utc>,
    ) -> DomainResult<Payment>;
    async fn totals_by_method(&self) -> DomainResult<Vec<PaymentMethodTotal>>;
    async fn total(&self) -> DomainResult<Decimal>;
    async fn delete_all(&self) -> DomainResult<()>;
}

//! Parking operations: check-in, live fee preview, checkout, day summary

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::price_table::calculate_fee;
use crate::domain::{
    DomainError, DomainResult, NewVehicle, PaymentMethod, PaymentMethodTotal, PriceTable,
    RepositoryProvider, Vehicle,
};

/// A point-in-time fee computation for an open session.
///
/// Callers poll this on a timer while a checkout screen is open; every call
/// is independent, only the supplied instant advances.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeQuote {
    pub vehicle_id: i64,
    pub amount: Decimal,
    /// Billable minutes, i.e. the stay beyond the tolerance window.
    pub billable_minutes: i64,
    /// True when the table has neither a flat nor an incremental rule.
    pub misconfigured: bool,
    pub at: DateTime<Utc>,
}

/// Revenue summary grouped by payment method.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSummary {
    pub by_method: Vec<PaymentMethodTotal>,
    pub total: Decimal,
}

/// Service for the parking lot lifecycle
pub struct ParkingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ParkingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a vehicle entering the lot.
    pub async fn check_in(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let table = self
            .repos
            .price_tables()
            .find_by_id(new.price_table_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "PriceTable",
                field: "id",
                value: new.price_table_id.to_string(),
            })?;

        if !table.has_pricing_rules() {
            warn!(
                table_id = table.id,
                table_name = %table.name,
                "checking in against a price table with no pricing rules"
            );
        }

        let vehicle = self.repos.vehicles().insert(new).await?;
        info!(
            vehicle_id = vehicle.id,
            plate = %vehicle.plate,
            "vehicle checked in"
        );
        Ok(vehicle)
    }

    /// Recompute the amount due for an open session at the given instant.
    pub async fn preview_fee(&self, vehicle_id: i64, at: DateTime<Utc>) -> DomainResult<FeeQuote> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        // A frozen session keeps quoting its recorded exit instant.
        let exit = vehicle.exit_at.unwrap_or(at);
        self.quote(&vehicle, exit).await
    }

    /// Close the session: fix the exit instant, freeze the amount and record
    /// the payment. Fails with `Conflict` if the vehicle already left.
    pub async fn check_out(
        &self,
        vehicle_id: i64,
        payment_method_id: i64,
        at: DateTime<Utc>,
    ) -> DomainResult<Vehicle> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        if !vehicle.in_lot {
            return Err(DomainError::Conflict(format!(
                "vehicle {} already checked out",
                vehicle_id
            )));
        }

        self.repos
            .payment_methods()
            .find_by_id(payment_method_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "PaymentMethod",
                field: "id",
                value: payment_method_id.to_string(),
            })?;

        let quote = self.quote(&vehicle, at).await?;

        let updated = vehicle.checked_out(at, quote.amount, payment_method_id);
        self.repos.vehicles().update(updated.clone()).await?;
        self.repos
            .payments()
            .insert(vehicle_id, payment_method_id, quote.amount, at)
            .await?;

        info!(
            vehicle_id,
            plate = %updated.plate,
            amount = %quote.amount,
            "vehicle checked out"
        );
        Ok(updated)
    }

    pub async fn vehicle(&self, id: i64) -> DomainResult<Vehicle> {
        self.require_vehicle(id).await
    }

    pub async fn vehicles_in_lot(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_in_lot().await
    }

    pub async fn occupancy(&self) -> DomainResult<u64> {
        self.repos.vehicles().count_in_lot().await
    }

    pub async fn price_tables(&self) -> DomainResult<Vec<PriceTable>> {
        self.repos.price_tables().find_all().await
    }

    pub async fn price_table(&self, id: i64) -> DomainResult<PriceTable> {
        self.repos
            .price_tables()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "PriceTable",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn payment_methods(&self) -> DomainResult<Vec<PaymentMethod>> {
        self.repos.payment_methods().find_all().await
    }

    pub async fn payment_summary(&self) -> DomainResult<PaymentSummary> {
        let by_method = self.repos.payments().totals_by_method().await?;
        let total = self.repos.payments().total().await?;
        Ok(PaymentSummary { by_method, total })
    }

    /// Bulk local reset used when the work session is closed.
    pub async fn reset_local(&self) -> DomainResult<()> {
        self.repos.payments().delete_all().await?;
        self.repos.vehicles().delete_all().await?;
        info!("local vehicles and payments cleared");
        Ok(())
    }

    async fn require_vehicle(&self, id: i64) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn quote(&self, vehicle: &Vehicle, exit: DateTime<Utc>) -> DomainResult<FeeQuote> {
        let table = self
            .repos
            .price_tables()
            .find_by_id(vehicle.price_table_id)
            .await?;

        // The table can disappear between check-in and checkout (a sync
        // replaced the set). Degrade to a zero charge instead of blocking
        // the checkout flow.
        let Some(table) = table else {
            warn!(
                vehicle_id = vehicle.id,
                price_table_id = vehicle.price_table_id,
                "price table missing at quote time, charging nothing"
            );
            return Ok(FeeQuote {
                vehicle_id: vehicle.id,
                amount: Decimal::ZERO,
                billable_minutes: 0,
                misconfigured: true,
                at: exit,
            });
        };

        let amount = calculate_fee(&table, vehicle.entry_at, exit)?;
        let effective_entry = vehicle.entry_at + Duration::minutes(table.tolerance_minutes);
        let billable_minutes = (exit - effective_entry).num_minutes().max(0);

        Ok(FeeQuote {
            vehicle_id: vehicle.id,
            amount,
            billable_minutes,
            misconfigured: !table.has_pricing_rules(),
            at: exit,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::MemoryRepos;
    use crate::domain::price_table::{FlatRate, IncrementalRate, PriceTable};
    use crate::domain::PaymentMethod;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    fn table() -> PriceTable {
        PriceTable {
            id: 7,
            name: "Carro".into(),
            tolerance_minutes: 0,
            flat_until: Some(FlatRate {
                period_minutes: 60,
                value: dec("10.00"),
            }),
            incremental: Some(IncrementalRate {
                from_minutes: 60,
                every_minutes: 30,
                add_value: dec("5.00"),
            }),
            cap: None,
        }
    }

    fn cash() -> PaymentMethod {
        PaymentMethod {
            id: 3,
            name: "Dinheiro".into(),
            receiving_days: 0,
            receiving_fee: Decimal::ZERO,
        }
    }

    fn service() -> (ParkingService, Arc<MemoryRepos>) {
        let repos = Arc::new(MemoryRepos::default());
        repos.seed_price_table(table());
        repos.seed_payment_method(cash());
        let service = ParkingService::new(repos.clone());
        (service, repos)
    }

    fn new_vehicle() -> NewVehicle {
        NewVehicle {
            plate: "ABC1D23".into(),
            model: "Onix".into(),
            color: "Prata".into(),
            price_table_id: 7,
            entry_at: t0(),
        }
    }

    #[tokio::test]
    async fn check_in_assigns_id_and_keeps_vehicle_in_lot() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        assert!(vehicle.id > 0);
        assert!(vehicle.in_lot);
        assert_eq!(service.occupancy().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn check_in_rejects_unknown_price_table() {
        let (service, _) = service();
        let mut new = new_vehicle();
        new.price_table_id = 99;
        let err = service.check_in(new).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "PriceTable", .. }));
    }

    #[tokio::test]
    async fn preview_advances_with_the_supplied_instant() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();

        let q1 = service
            .preview_fee(vehicle.id, t0() + Duration::minutes(30))
            .await
            .unwrap();
        assert_eq!(q1.amount, dec("10.00"));

        let q2 = service
            .preview_fee(vehicle.id, t0() + Duration::minutes(89))
            .await
            .unwrap();
        assert_eq!(q2.amount, dec("15.00"));
        assert_eq!(q2.billable_minutes, 89);
    }

    #[tokio::test]
    async fn check_out_freezes_amount_and_records_payment() {
        let (service, repos) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();

        let exit = t0() + Duration::minutes(89);
        let out = service.check_out(vehicle.id, 3, exit).await.unwrap();
        assert_eq!(out.amount_due, Some(dec("15.00")));
        assert_eq!(out.exit_at, Some(exit));
        assert!(!out.in_lot);
        assert_eq!(service.occupancy().await.unwrap(), 0);

        let summary = service.payment_summary().await.unwrap();
        assert_eq!(summary.total, dec("15.00"));
        assert_eq!(summary.by_method.len(), 1);
        assert_eq!(summary.by_method[0].payment_method_name, "Dinheiro");
        assert_eq!(repos.payment_count(), 1);
    }

    #[tokio::test]
    async fn preview_after_checkout_quotes_the_frozen_exit() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        let exit = t0() + Duration::minutes(60);
        service.check_out(vehicle.id, 3, exit).await.unwrap();

        // a much later preview still reflects the frozen exit instant
        let quote = service
            .preview_fee(vehicle.id, t0() + Duration::minutes(600))
            .await
            .unwrap();
        assert_eq!(quote.amount, dec("10.00"));
    }

    #[tokio::test]
    async fn double_checkout_is_a_conflict() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        let exit = t0() + Duration::minutes(10);
        service.check_out(vehicle.id, 3, exit).await.unwrap();
        let err = service.check_out(vehicle.id, 3, exit).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn check_out_with_unknown_payment_method_fails() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        let err = service
            .check_out(vehicle.id, 42, t0() + Duration::minutes(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "PaymentMethod", .. }));
    }

    #[tokio::test]
    async fn check_out_before_entry_is_rejected() {
        let (service, _) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        let err = service
            .check_out(vehicle.id, 3, t0() - Duration::minutes(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInterval { .. }));
    }

    #[tokio::test]
    async fn missing_price_table_degrades_to_zero_charge() {
        let (service, repos) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        repos.clear_price_tables();

        let quote = service
            .preview_fee(vehicle.id, t0() + Duration::minutes(90))
            .await
            .unwrap();
        assert_eq!(quote.amount, Decimal::ZERO);
        assert!(quote.misconfigured);
    }

    #[tokio::test]
    async fn reset_local_clears_vehicles_and_payments() {
        let (service, repos) = service();
        let vehicle = service.check_in(new_vehicle()).await.unwrap();
        service
            .check_out(vehicle.id, 3, t0() + Duration::minutes(30))
            .await
            .unwrap();

        service.reset_local().await.unwrap();
        assert!(service.vehicles_in_lot().await.unwrap().is_empty());
        assert_eq!(repos.payment_count(), 0);
        assert_eq!(service.payment_summary().await.unwrap().total, Decimal::ZERO);
    }
}

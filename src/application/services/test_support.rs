//! In-memory repository fakes for service tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::payment::{PaymentMethodRepository, PaymentRepository};
use crate::domain::price_table::PriceTableRepository;
use crate::domain::vehicle::VehicleRepository;
use crate::domain::{
    DomainResult, NewVehicle, Payment, PaymentMethod, PaymentMethodTotal, PriceTable,
    RepositoryProvider, Vehicle,
};

/// All four repositories backed by plain vectors.
#[derive(Default)]
pub struct MemoryRepos {
    price_tables: Mutex<Vec<PriceTable>>,
    vehicles: Mutex<Vec<Vehicle>>,
    payment_methods: Mutex<Vec<PaymentMethod>>,
    payments: Mutex<Vec<Payment>>,
    next_vehicle_id: Mutex<i64>,
}

impl MemoryRepos {
    pub fn seed_price_table(&self, table: PriceTable) {
        self.price_tables.lock().unwrap().push(table);
    }

    pub fn seed_payment_method(&self, method: PaymentMethod) {
        self.payment_methods.lock().unwrap().push(method);
    }

    pub fn clear_price_tables(&self) {
        self.price_tables.lock().unwrap().clear();
    }

    pub fn payment_count(&self) -> usize {
        self.payments.lock().unwrap().len()
    }
}

impl RepositoryProvider for MemoryRepos {
    fn price_tables(&self) -> &dyn PriceTableRepository {
        self
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn payment_methods(&self) -> &dyn PaymentMethodRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }
}

#[async_trait]
impl PriceTableRepository for MemoryRepos {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PriceTable>> {
        Ok(self
            .price_tables
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<PriceTable>> {
        Ok(self.price_tables.lock().unwrap().clone())
    }

    async fn replace_all(&self, tables: Vec<PriceTable>) -> DomainResult<()> {
        *self.price_tables.lock().unwrap() = tables;
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.price_tables.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for MemoryRepos {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn find_in_lot(&self) -> DomainResult<Vec<Vehicle>> {
        let mut in_lot: Vec<Vehicle> = self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.in_lot)
            .cloned()
            .collect();
        in_lot.sort_by(|a, b| b.entry_at.cmp(&a.entry_at));
        Ok(in_lot)
    }

    async fn count_in_lot(&self) -> DomainResult<u64> {
        Ok(self.vehicles.lock().unwrap().iter().filter(|v| v.in_lot).count() as u64)
    }

    async fn insert(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let mut next_id = self.next_vehicle_id.lock().unwrap();
        *next_id += 1;
        let vehicle = Vehicle {
            id: *next_id,
            plate: new.plate,
            model: new.model,
            color: new.color,
            price_table_id: new.price_table_id,
            price_table_name: None,
            entry_at: new.entry_at,
            exit_at: None,
            amount_due: None,
            payment_method_id: None,
            in_lot: true,
        };
        self.vehicles.lock().unwrap().push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        let mut vehicles = self.vehicles.lock().unwrap();
        if let Some(slot) = vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            *slot = vehicle;
        }
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.vehicles.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl PaymentMethodRepository for MemoryRepos {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PaymentMethod>> {
        Ok(self
            .payment_methods
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<PaymentMethod>> {
        Ok(self.payment_methods.lock().unwrap().clone())
    }

    async fn replace_all(&self, methods: Vec<PaymentMethod>) -> DomainResult<()> {
        *self.payment_methods.lock().unwrap() = methods;
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.payment_methods.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MemoryRepos {
    async fn insert(
        &self,
        vehicle_id: i64,
        payment_method_id: i64,
        amount: Decimal,
        paid_at: DateTime<Utc>,
    ) -> DomainResult<Payment> {
        let mut payments = self.payments.lock().unwrap();
        let payment = Payment {
            id: payments.len() as i64 + 1,
            vehicle_id,
            payment_method_id,
            amount,
            paid_at,
        };
        payments.push(payment.clone());
        Ok(payment)
    }

    async fn totals_by_method(&self) -> DomainResult<Vec<PaymentMethodTotal>> {
        let payments = self.payments.lock().unwrap();
        let methods = self.payment_methods.lock().unwrap();
        let mut totals: Vec<PaymentMethodTotal> = Vec::new();
        for method in methods.iter() {
            let total: Decimal = payments
                .iter()
                .filter(|p| p.payment_method_id == method.id)
                .map(|p| p.amount)
                .sum();
            if !total.is_zero() {
                totals.push(PaymentMethodTotal {
                    payment_method_id: method.id,
                    payment_method_name: method.name.clone(),
                    total,
                });
            }
        }
        Ok(totals)
    }

    async fn total(&self) -> DomainResult<Decimal> {
        Ok(self.payments.lock().unwrap().iter().map(|p| p.amount).sum())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        self.payments.lock().unwrap().clear();
        Ok(())
    }
}

//! Concrete repository provider backed by SeaORM

use sea_orm::DatabaseConnection;

use crate::domain::payment::{PaymentMethodRepository, PaymentRepository};
use crate::domain::price_table::PriceTableRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::VehicleRepository;

use super::payment_repository::{SeaOrmPaymentMethodRepository, SeaOrmPaymentRepository};
use super::price_table_repository::SeaOrmPriceTableRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Bundles the SQLite-backed repositories behind the domain traits.
pub struct SeaOrmRepositoryProvider {
    price_tables: SeaOrmPriceTableRepository,
    vehicles: SeaOrmVehicleRepository,
    payment_methods: SeaOrmPaymentMethodRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            price_tables: SeaOrmPriceTableRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            payment_methods: SeaOrmPaymentMethodRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn price_tables(&self) -> &dyn PriceTableRepository {
        &self.price_tables
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn payment_methods(&self) -> &dyn PaymentMethodRepository {
        &self.payment_methods
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}

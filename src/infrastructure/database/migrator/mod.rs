//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_price_tables;
mod m20240601_000002_create_vehicles;
mod m20240601_000003_create_payment_methods;
mod m20240601_000004_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_price_tables::Migration),
            Box::new(m20240601_000002_create_vehicles::Migration),
            Box::new(m20240601_000003_create_payment_methods::Migration),
            Box::new(m20240601_000004_create_payments::Migration),
        ]
    }
}

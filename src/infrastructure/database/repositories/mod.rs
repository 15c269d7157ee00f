//! SeaORM repository implementations

mod payment_repository;
mod price_table_repository;
mod repository_provider;
mod vehicle_repository;

pub use payment_repository::{SeaOrmPaymentMethodRepository, SeaOrmPaymentRepository};
pub use price_table_repository::SeaOrmPriceTableRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use vehicle_repository::SeaOrmVehicleRepository;

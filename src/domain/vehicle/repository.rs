//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{NewVehicle, Vehicle};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>>;
    /// Vehicles currently in the lot, newest entry first.
    async fn find_in_lot(&self) -> DomainResult<Vec<Vehicle>>;
    async fn count_in_lot(&self) -> DomainResult<u64>;
    async fn insert(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn delete_all(&self) -> DomainResult<()>;
}

//! Unified repository access for the application layer

use crate::domain::payment::{PaymentMethodRepository, PaymentRepository};
use crate::domain::price_table::PriceTableRepository;
use crate::domain::vehicle::VehicleRepository;

/// Per-aggregate repository accessors behind one provider.
///
/// Services receive an `Arc<dyn RepositoryProvider>` at construction;
/// wiring happens explicitly at startup.
pub trait RepositoryProvider: Send + Sync {
    fn price_tables(&self) -> &dyn PriceTableRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn payment_methods(&self) -> &dyn PaymentMethodRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}

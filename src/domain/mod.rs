pub mod error;
pub mod payment;
pub mod price_table;
pub mod repositories;
pub mod vehicle;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use payment::{Payment, PaymentMethod, PaymentMethodTotal};
pub use price_table::{calculate_fee, ChargeCap, FlatRate, IncrementalRate, PriceTable, RateItem};
pub use repositories::RepositoryProvider;
pub use vehicle::{NewVehicle, Vehicle};

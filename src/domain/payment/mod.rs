pub mod model;
pub mod repository;

pub use model::{Payment, PaymentMethod, PaymentMethodTotal};
pub use repository::{PaymentMethodRepository, PaymentRepository};

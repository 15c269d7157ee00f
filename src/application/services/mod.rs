pub mod parking;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use parking::{FeeQuote, ParkingService, PaymentSummary};
pub use sync::{AuthSession, LoginOutcome, ManualLoad, SyncApi, SyncService, SyncSummary};

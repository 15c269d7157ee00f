pub mod services;

pub use services::{
    AuthSession, FeeQuote, LoginOutcome, ManualLoad, ParkingService, PaymentSummary, SyncApi,
    SyncService, SyncSummary,
};

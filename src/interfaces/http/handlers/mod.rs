//! HTTP API handlers

pub mod health;
pub mod payments;
pub mod price_tables;
pub mod sync;
pub mod vehicles;

use std::sync::Arc;

use crate::application::services::{ParkingService, SyncService};

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub parking: Arc<ParkingService>,
    pub sync: Arc<SyncService>,
}

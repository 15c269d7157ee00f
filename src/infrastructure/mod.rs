//! Infrastructure layer: persistence and upstream API access

pub mod database;
pub mod remote;

pub use database::{init_database, DatabaseConfig};

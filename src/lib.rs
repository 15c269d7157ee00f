//! # Parkmatic
//!
//! Parking lot management service: vehicle sessions, price table
//! normalization, parking fee calculation and synchronization with the
//! upstream establishment API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the fee calculator and repository traits
//! - **application**: Use-case services (parking lifecycle, upstream sync)
//! - **infrastructure**: SQLite persistence (SeaORM) and the upstream API client
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Shutdown signal plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::remote::SyncClient;

// Re-export API router
pub use interfaces::http::create_api_router;

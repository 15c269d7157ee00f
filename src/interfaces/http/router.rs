//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{ParkingService, SyncService};
use crate::interfaces::http::common::ApiResponse;

use super::handlers::{health, payments, price_tables, sync, vehicles, AppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Vehicles
        vehicles::check_in,
        vehicles::list_vehicles_in_lot,
        vehicles::occupancy,
        vehicles::get_vehicle,
        vehicles::preview_fee,
        vehicles::check_out,
        // Price tables
        price_tables::list_price_tables,
        price_tables::get_price_table,
        // Payments
        payments::list_payment_methods,
        payments::payment_summary,
        // Sync
        sync::login,
        sync::get_session,
        sync::logout,
        sync::manual_load,
        sync::close_session,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Vehicles
            vehicles::VehicleResponse,
            vehicles::CheckInRequest,
            vehicles::CheckOutRequest,
            vehicles::FeeQuoteResponse,
            vehicles::OccupancyResponse,
            // Price tables
            price_tables::PriceTableResponse,
            price_tables::FlatRateDto,
            price_tables::IncrementalRateDto,
            price_tables::ChargeCapDto,
            // Payments
            payments::PaymentMethodResponse,
            payments::MethodTotalDto,
            payments::PaymentSummaryResponse,
            // Sync
            sync::LoginRequest,
            sync::SessionResponse,
            sync::SyncSummaryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Vehicles", description = "Vehicle sessions: check-in, fee preview, checkout"),
        (name = "Price Tables", description = "Synced price tables in canonical form"),
        (name = "Payments", description = "Payment methods and revenue summary"),
        (name = "Sync", description = "Upstream login, manual load and session close"),
    ),
    info(
        title = "Parkmatic API",
        version = "1.0.0",
        description = "REST API for parking lot management: vehicle sessions, fee calculation and upstream sync",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(parking: Arc<ParkingService>, sync_service: Arc<SyncService>) -> Router {
    let state = AppState {
        parking,
        sync: sync_service,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles_in_lot).post(vehicles::check_in),
        )
        .route("/occupancy", get(vehicles::occupancy))
        .route("/{id}", get(vehicles::get_vehicle))
        .route("/{id}/fee", get(vehicles::preview_fee))
        .route("/{id}/checkout", post(vehicles::check_out));

    let price_table_routes = Router::new()
        .route("/", get(price_tables::list_price_tables))
        .route("/{id}", get(price_tables::get_price_table));

    let payment_routes = Router::new()
        .route("/methods", get(payments::list_payment_methods))
        .route("/summary", get(payments::payment_summary));

    let sync_routes = Router::new()
        .route("/login", post(sync::login))
        .route("/logout", post(sync::logout))
        .route("/session", get(sync::get_session))
        .route("/manual-load", post(sync::manual_load))
        .route("/close-session", post(sync::close_session));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/price-tables", price_table_routes)
        .nest("/api/v1/payments", payment_routes)
        .nest("/api/v1/sync", sync_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

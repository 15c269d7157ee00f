//! Vehicle session REST handlers: check-in, fee preview, checkout

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::FeeQuote;
use crate::domain::{NewVehicle, Vehicle};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

use super::AppState;

/// Vehicle session as exposed over the API
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleResponse {
    pub id: i64,
    pub plate: String,
    pub model: String,
    pub color: String,
    pub price_table_id: i64,
    pub price_table_name: Option<String>,
    pub entry_at: DateTime<Utc>,
    pub exit_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<f64>)]
    pub amount_due: Option<Decimal>,
    pub payment_method_id: Option<i64>,
    pub in_lot: bool,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            plate: v.plate,
            model: v.model,
            color: v.color,
            price_table_id: v.price_table_id,
            price_table_name: v.price_table_name,
            entry_at: v.entry_at,
            exit_at: v.exit_at,
            amount_due: v.amount_due,
            payment_method_id: v.payment_method_id,
            in_lot: v.in_lot,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 10))]
    pub plate: String,
    #[validate(length(max = 60))]
    #[serde(default)]
    pub model: String,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub color: String,
    pub price_table_id: i64,
    /// Entry instant; defaults to the server clock.
    pub entry_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckOutRequest {
    pub payment_method_id: i64,
    /// Exit instant; defaults to the server clock.
    pub exit_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeePreviewParams {
    /// Instant to quote at; defaults to the server clock.
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeQuoteResponse {
    pub vehicle_id: i64,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub billable_minutes: i64,
    /// True when the assigned price table cannot produce a charge.
    pub misconfigured: bool,
    pub at: DateTime<Utc>,
}

impl From<FeeQuote> for FeeQuoteResponse {
    fn from(q: FeeQuote) -> Self {
        Self {
            vehicle_id: q.vehicle_id,
            amount: q.amount,
            billable_minutes: q.billable_minutes,
            misconfigured: q.misconfigured,
            at: q.at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyResponse {
    pub vehicles_in_lot: u64,
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Vehicle checked in", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Price table not found"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CheckInRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let new = NewVehicle {
        plate: req.plate,
        model: req.model,
        color: req.color,
        price_table_id: req.price_table_id,
        entry_at: req.entry_at.unwrap_or_else(Utc::now),
    };

    match state.parking.check_in(new).await {
        Ok(vehicle) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(vehicle.into())),
        )),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Vehicles currently in the lot", body = ApiResponse<Vec<VehicleResponse>>)
    )
)]
pub async fn list_vehicles_in_lot(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.vehicles_in_lot().await {
        Ok(vehicles) => Ok(Json(ApiResponse::success(
            vehicles.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/occupancy",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Current occupancy", body = ApiResponse<OccupancyResponse>)
    )
)]
pub async fn occupancy(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OccupancyResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.occupancy().await {
        Ok(count) => Ok(Json(ApiResponse::success(OccupancyResponse {
            vehicles_in_lot: count,
        }))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VehicleResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.vehicle(id).await {
        Ok(vehicle) => Ok(Json(ApiResponse::success(vehicle.into()))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/fee",
    tag = "Vehicles",
    params(
        ("id" = i64, Path, description = "Vehicle ID"),
        FeePreviewParams
    ),
    responses(
        (status = 200, description = "Current fee quote", body = ApiResponse<FeeQuoteResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn preview_fee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FeePreviewParams>,
) -> Result<Json<ApiResponse<FeeQuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let at = params.at.unwrap_or_else(Utc::now);
    match state.parking.preview_fee(id, at).await {
        Ok(quote) => Ok(Json(ApiResponse::success(quote.into()))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/checkout",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Vehicle checked out", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Vehicle or payment method not found"),
        (status = 409, description = "Vehicle already checked out")
    )
)]
pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CheckOutRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let at = req.exit_at.unwrap_or_else(Utc::now);
    match state.parking.check_out(id, req.payment_method_id, at).await {
        Ok(vehicle) => Ok(Json(ApiResponse::success(vehicle.into()))),
        Err(e) => Err(error_response(e)),
    }
}

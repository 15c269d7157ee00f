//! Price table REST handlers (read-only; tables come from sync)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::price_table::{ChargeCap, FlatRate, IncrementalRate};
use crate::domain::PriceTable;
use crate::interfaces::http::common::{error_response, ApiResponse};

use super::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct FlatRateDto {
    pub period_minutes: i64,
    #[schema(value_type = f64)]
    pub value: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IncrementalRateDto {
    pub from_minutes: i64,
    pub every_minutes: i64,
    #[schema(value_type = f64)]
    pub add_value: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChargeCapDto {
    pub period_minutes: i64,
    #[schema(value_type = f64)]
    pub max_value: Decimal,
}

/// Canonical price table
#[derive(Debug, Serialize, ToSchema)]
pub struct PriceTableResponse {
    pub id: i64,
    pub name: String,
    pub tolerance_minutes: i64,
    pub flat_until: Option<FlatRateDto>,
    pub incremental: Option<IncrementalRateDto>,
    pub cap: Option<ChargeCapDto>,
    /// False when the table can never produce a charge.
    pub has_pricing_rules: bool,
}

impl From<PriceTable> for PriceTableResponse {
    fn from(t: PriceTable) -> Self {
        let has_pricing_rules = t.has_pricing_rules();
        Self {
            id: t.id,
            name: t.name,
            tolerance_minutes: t.tolerance_minutes,
            flat_until: t.flat_until.map(|f: FlatRate| FlatRateDto {
                period_minutes: f.period_minutes,
                value: f.value,
            }),
            incremental: t.incremental.map(|i: IncrementalRate| IncrementalRateDto {
                from_minutes: i.from_minutes,
                every_minutes: i.every_minutes,
                add_value: i.add_value,
            }),
            cap: t.cap.map(|c: ChargeCap| ChargeCapDto {
                period_minutes: c.period_minutes,
                max_value: c.max_value,
            }),
            has_pricing_rules,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/price-tables",
    tag = "Price Tables",
    responses(
        (status = 200, description = "Price table list", body = ApiResponse<Vec<PriceTableResponse>>)
    )
)]
pub async fn list_price_tables(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PriceTableResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.price_tables().await {
        Ok(tables) => Ok(Json(ApiResponse::success(
            tables.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/price-tables/{id}",
    tag = "Price Tables",
    params(("id" = i64, Path, description = "Price table ID")),
    responses(
        (status = 200, description = "Price table details", body = ApiResponse<PriceTableResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_price_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PriceTableResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.price_table(id).await {
        Ok(table) => Ok(Json(ApiResponse::success(table.into()))),
        Err(e) => Err(error_response(e)),
    }
}

//! Payment method and revenue summary handlers

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PaymentMethod, PaymentMethodTotal};
use crate::interfaces::http::common::{error_response, ApiResponse};

use super::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodResponse {
    pub id: i64,
    pub name: String,
    pub receiving_days: i32,
    #[schema(value_type = f64)]
    pub receiving_fee: Decimal,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(m: PaymentMethod) -> Self {
        Self {
            id: m.id,
            name: m.name,
            receiving_days: m.receiving_days,
            receiving_fee: m.receiving_fee,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MethodTotalDto {
    pub payment_method_id: i64,
    pub payment_method_name: String,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl From<PaymentMethodTotal> for MethodTotalDto {
    fn from(t: PaymentMethodTotal) -> Self {
        Self {
            payment_method_id: t.payment_method_id,
            payment_method_name: t.payment_method_name,
            total: t.total,
        }
    }
}

/// Revenue grouped by payment method
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentSummaryResponse {
    pub by_method: Vec<MethodTotalDto>,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/methods",
    tag = "Payments",
    responses(
        (status = 200, description = "Accepted payment methods", body = ApiResponse<Vec<PaymentMethodResponse>>)
    )
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PaymentMethodResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.payment_methods().await {
        Ok(methods) => Ok(Json(ApiResponse::success(
            methods.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/summary",
    tag = "Payments",
    responses(
        (status = 200, description = "Revenue summary", body = ApiResponse<PaymentSummaryResponse>)
    )
)]
pub async fn payment_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentSummaryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.parking.payment_summary().await {
        Ok(summary) => Ok(Json(ApiResponse::success(PaymentSummaryResponse {
            by_method: summary.by_method.into_iter().map(Into::into).collect(),
            total: summary.total,
        }))),
        Err(e) => Err(error_response(e)),
    }
}

//! Upstream session handlers: login, manual load, close session

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::{AuthSession, SyncSummary};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

use super::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Upstream session; the token itself is never echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: i64,
    pub establishment_id: i64,
    pub session_id: Option<i64>,
    pub email: String,
    pub name: Option<String>,
}

impl From<AuthSession> for SessionResponse {
    fn from(s: AuthSession) -> Self {
        Self {
            user_id: s.user_id,
            establishment_id: s.establishment_id,
            session_id: s.session_id,
            email: s.email,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncSummaryResponse {
    pub price_tables: usize,
    pub payment_methods: usize,
}

impl From<SyncSummary> for SyncSummaryResponse {
    fn from(s: SyncSummary) -> Self {
        Self {
            price_tables: s.price_tables,
            payment_methods: s.payment_methods,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/sync/login",
    tag = "Sync",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 502, description = "Upstream API unavailable")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.sync.login(&req.email, &req.password).await {
        Ok(session) => Ok(Json(ApiResponse::success(session.into()))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/sync/session",
    tag = "Sync",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<SessionResponse>),
        (status = 404, description = "Not logged in")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.sync.session().await {
        Some(session) => Ok(Json(ApiResponse::success(session.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No active session")),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/sync/logout",
    tag = "Sync",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<String>)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
) -> Json<ApiResponse<String>> {
    state.sync.logout().await;
    Json(ApiResponse::success("Logged out".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/v1/sync/manual-load",
    tag = "Sync",
    responses(
        (status = 200, description = "Local tables replaced", body = ApiResponse<SyncSummaryResponse>),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "Upstream API unavailable")
    )
)]
pub async fn manual_load(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SyncSummaryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.sync.manual_load().await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary.into()))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/sync/close-session",
    tag = "Sync",
    responses(
        (status = 200, description = "Work session closed, local data cleared", body = ApiResponse<String>),
        (status = 400, description = "No open work session"),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "Upstream API unavailable")
    )
)]
pub async fn close_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.sync.close_session().await {
        Ok(()) => Ok(Json(ApiResponse::success("Session closed".to_string()))),
        Err(e) => Err(error_response(e)),
    }
}

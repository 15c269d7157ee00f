//! reqwest client for the upstream establishment API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::application::services::{LoginOutcome, ManualLoad, SyncApi};
use crate::domain::{DomainError, DomainResult};

use super::dto::{CloseSessionResponse, LoginResponse, ManualLoadResponse};

const CLIENT_SIDE: &str = "app";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for login, manual load and session close.
pub struct SyncClient {
    base_url: String,
    http: reqwest::Client,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Upstream(format!("http client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

fn transport_err(e: reqwest::Error) -> DomainError {
    DomainError::Upstream(format!("upstream request failed: {}", e))
}

async fn error_body(status: StatusCode, response: reqwest::Response) -> DomainError {
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        DomainError::Unauthorized(if body.is_empty() {
            status.to_string()
        } else {
            body
        })
    } else {
        DomainError::Upstream(format!("upstream returned {}: {}", status, body))
    }
}

#[async_trait]
impl SyncApi for SyncClient {
    async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let url = format!("{}/user/login", self.base_url);
        debug!(%url, "upstream login");

        let response = self
            .http
            .post(&url)
            .header("clientSide", CLIENT_SIDE)
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_body(status, response).await);
        }

        let parsed: LoginResponse = response.json().await.map_err(transport_err)?;
        let establishment_id = parsed.establishment_id();
        let data = parsed
            .data
            .ok_or_else(|| DomainError::Upstream("login response without data".to_string()))?;
        let user = data
            .user
            .ok_or_else(|| DomainError::Upstream("login response without user".to_string()))?;

        let token = user.access_token.ok_or_else(|| {
            DomainError::Unauthorized("login response without access token".to_string())
        })?;
        let user_id = user
            .user_id
            .ok_or_else(|| DomainError::Upstream("login response without user id".to_string()))?;
        let establishment_id = establishment_id.ok_or_else(|| {
            DomainError::Upstream("login response without establishment".to_string())
        })?;

        Ok(LoginOutcome {
            user_id,
            establishment_id,
            session_id: data.session.and_then(|s| s.session_id),
            token,
            email: user.email.unwrap_or_else(|| email.to_string()),
            name: user.name,
        })
    }

    async fn manual_load(
        &self,
        user_id: i64,
        establishment_id: i64,
        token: &str,
    ) -> DomainResult<ManualLoad> {
        let url = format!(
            "{}/{}/establishment/{}/sync/manual",
            self.base_url, user_id, establishment_id
        );
        debug!(%url, "manual load");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("clientSide", CLIENT_SIDE)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_body(status, response).await);
        }

        let parsed: ManualLoadResponse = response.json().await.map_err(transport_err)?;
        let data = parsed.data.ok_or_else(|| {
            DomainError::Upstream("manual load response without data".to_string())
        })?;

        if data.prices.is_none() {
            warn!("manual load payload has no prices field");
        }
        if data.payment_methods.is_none() {
            warn!("manual load payload has no paymentMethods field");
        }

        Ok(ManualLoad {
            price_tables: data
                .prices
                .unwrap_or_default()
                .into_iter()
                .map(|dto| dto.into_price_table())
                .collect(),
            payment_methods: data
                .payment_methods
                .unwrap_or_default()
                .into_iter()
                .map(|dto| dto.into_payment_method())
                .collect(),
            session_id: data.session_id,
        })
    }

    async fn close_session(
        &self,
        user_id: i64,
        establishment_id: i64,
        session_id: i64,
        token: &str,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/{}/establishment/{}/session/close/{}",
            self.base_url, user_id, establishment_id, session_id
        );
        debug!(%url, "close session");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header("clientSide", CLIENT_SIDE)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_body(status, response).await);
        }

        let _: CloseSessionResponse = response.json().await.map_err(transport_err)?;
        Ok(())
    }
}

//! Synchronization with the upstream establishment API
//!
//! Holds the authenticated work session and pulls price tables and payment
//! methods into the local store. The upstream payload is loosely typed;
//! normalization into the canonical table form happens in the client layer
//! before anything reaches this service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, PaymentMethod, PriceTable, RepositoryProvider};

/// Authenticated upstream session, kept until logout or close.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user_id: i64,
    pub establishment_id: i64,
    /// Upstream work-session id, present once opened server-side.
    pub session_id: Option<i64>,
    pub token: String,
    pub email: String,
    pub name: Option<String>,
}

/// Result of an upstream login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user_id: i64,
    pub establishment_id: i64,
    pub session_id: Option<i64>,
    pub token: String,
    pub email: String,
    pub name: Option<String>,
}

/// Payload of a manual load, already normalized.
#[derive(Debug, Clone)]
pub struct ManualLoad {
    pub price_tables: Vec<PriceTable>,
    pub payment_methods: Vec<PaymentMethod>,
    pub session_id: Option<i64>,
}

/// Counts reported back after a manual load.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub price_tables: usize,
    pub payment_methods: usize,
}

/// Upstream API port, implemented by the reqwest client in infrastructure.
#[async_trait]
pub trait SyncApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome>;
    async fn manual_load(
        &self,
        user_id: i64,
        establishment_id: i64,
        token: &str,
    ) -> DomainResult<ManualLoad>;
    async fn close_session(
        &self,
        user_id: i64,
        establishment_id: i64,
        session_id: i64,
        token: &str,
    ) -> DomainResult<()>;
}

/// Service owning the upstream session and the local sync state
pub struct SyncService {
    repos: Arc<dyn RepositoryProvider>,
    api: Arc<dyn SyncApi>,
    session: RwLock<Option<AuthSession>>,
}

impl SyncService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, api: Arc<dyn SyncApi>) -> Self {
        Self {
            repos,
            api,
            session: RwLock::new(None),
        }
    }

    /// Authenticate against the upstream API and keep the session.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let outcome = self.api.login(email, password).await?;
        let session = AuthSession {
            user_id: outcome.user_id,
            establishment_id: outcome.establishment_id,
            session_id: outcome.session_id,
            token: outcome.token,
            email: outcome.email,
            name: outcome.name,
        };
        info!(
            user_id = session.user_id,
            establishment_id = session.establishment_id,
            "upstream login successful"
        );
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    pub async fn logout(&self) {
        *self.session.write().await = None;
    }

    /// Pull price tables and payment methods and replace the local sets.
    ///
    /// Each set is replaced in its own transaction, price tables first. If
    /// the second replace fails the tables are already committed; the next
    /// successful load reconciles both sets.
    pub async fn manual_load(&self) -> DomainResult<SyncSummary> {
        let session = self.require_session().await?;

        let load = self
            .api
            .manual_load(session.user_id, session.establishment_id, &session.token)
            .await?;

        if load.price_tables.is_empty() {
            warn!("upstream returned no price tables");
        }

        let summary = SyncSummary {
            price_tables: load.price_tables.len(),
            payment_methods: load.payment_methods.len(),
        };

        self.repos
            .price_tables()
            .replace_all(load.price_tables)
            .await?;
        self.repos
            .payment_methods()
            .replace_all(load.payment_methods)
            .await?;

        if let Some(session_id) = load.session_id {
            let mut guard = self.session.write().await;
            if let Some(s) = guard.as_mut() {
                s.session_id = Some(session_id);
            }
        }

        info!(
            price_tables = summary.price_tables,
            payment_methods = summary.payment_methods,
            "manual load completed"
        );
        Ok(summary)
    }

    /// Close the upstream work session, then clear local vehicles and
    /// payments. Local data is only touched after the upstream call
    /// succeeds.
    pub async fn close_session(&self) -> DomainResult<()> {
        let session = self.require_session().await?;
        let session_id = session.session_id.ok_or_else(|| {
            DomainError::Validation("no open work session to close".to_string())
        })?;

        self.api
            .close_session(
                session.user_id,
                session.establishment_id,
                session_id,
                &session.token,
            )
            .await?;

        self.repos.payments().delete_all().await?;
        self.repos.vehicles().delete_all().await?;

        if let Some(s) = self.session.write().await.as_mut() {
            s.session_id = None;
        }

        info!(session_id, "work session closed");
        Ok(())
    }

    async fn require_session(&self) -> DomainResult<AuthSession> {
        self.session
            .read()
            .await
            .clone()
            .ok_or_else(|| DomainError::Unauthorized("not logged in".to_string()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::MemoryRepos;
    use crate::domain::price_table::{FlatRate, PriceTable};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    struct FakeApi {
        load: Mutex<Option<ManualLoad>>,
        closed: Mutex<Vec<i64>>,
    }

    impl FakeApi {
        fn new(load: ManualLoad) -> Self {
            Self {
                load: Mutex::new(Some(load)),
                closed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SyncApi for FakeApi {
        async fn login(&self, email: &str, _password: &str) -> DomainResult<LoginOutcome> {
            Ok(LoginOutcome {
                user_id: 11,
                establishment_id: 22,
                session_id: None,
                token: "tok".into(),
                email: email.to_string(),
                name: Some("Operador".into()),
            })
        }

        async fn manual_load(
            &self,
            _user_id: i64,
            _establishment_id: i64,
            _token: &str,
        ) -> DomainResult<ManualLoad> {
            self.load
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| DomainError::Upstream("no payload".into()))
        }

        async fn close_session(
            &self,
            _user_id: i64,
            _establishment_id: i64,
            session_id: i64,
            _token: &str,
        ) -> DomainResult<()> {
            self.closed.lock().unwrap().push(session_id);
            Ok(())
        }
    }

    fn sample_table(id: i64) -> PriceTable {
        PriceTable {
            id,
            name: format!("Tabela {}", id),
            tolerance_minutes: 10,
            flat_until: Some(FlatRate {
                period_minutes: 60,
                value: "8.00".parse().unwrap(),
            }),
            incremental: None,
            cap: None,
        }
    }

    fn sample_load() -> ManualLoad {
        ManualLoad {
            price_tables: vec![sample_table(1), sample_table(2)],
            payment_methods: vec![PaymentMethod {
                id: 3,
                name: "Pix".into(),
                receiving_days: 0,
                receiving_fee: Decimal::ZERO,
            }],
            session_id: Some(555),
        }
    }

    fn service(load: ManualLoad) -> (SyncService, Arc<MemoryRepos>, Arc<FakeApi>) {
        let repos = Arc::new(MemoryRepos::default());
        let api = Arc::new(FakeApi::new(load));
        let service = SyncService::new(repos.clone(), api.clone());
        (service, repos, api)
    }

    #[tokio::test]
    async fn manual_load_requires_login() {
        let (service, _, _) = service(sample_load());
        let err = service.manual_load().await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn manual_load_replaces_local_sets_and_keeps_session_id() {
        let (service, repos, _) = service(sample_load());
        repos.seed_price_table(sample_table(99));

        service.login("op@lot.com", "secret").await.unwrap();
        let summary = service.manual_load().await.unwrap();
        assert_eq!(
            summary,
            SyncSummary {
                price_tables: 2,
                payment_methods: 1
            }
        );

        let tables = repos.price_tables().find_all().await.unwrap();
        assert_eq!(tables.len(), 2);
        assert!(tables.iter().all(|t| t.id != 99));

        let session = service.session().await.unwrap();
        assert_eq!(session.session_id, Some(555));
    }

    #[tokio::test]
    async fn close_session_calls_upstream_then_resets_local_data() {
        let (service, repos, api) = service(sample_load());
        service.login("op@lot.com", "secret").await.unwrap();
        service.manual_load().await.unwrap();

        let entry = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        repos
            .vehicles()
            .insert(crate::domain::NewVehicle {
                plate: "ABC1D23".into(),
                model: "Onix".into(),
                color: "Prata".into(),
                price_table_id: 1,
                entry_at: entry,
            })
            .await
            .unwrap();

        service.close_session().await.unwrap();

        assert_eq!(*api.closed.lock().unwrap(), vec![555]);
        assert_eq!(repos.vehicles().count_in_lot().await.unwrap(), 0);
        assert_eq!(service.session().await.unwrap().session_id, None);
    }

    #[tokio::test]
    async fn close_session_without_open_session_id_fails() {
        let (service, _, _) = service(sample_load());
        service.login("op@lot.com", "secret").await.unwrap();
        let err = service.close_session().await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

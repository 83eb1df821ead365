// src/services/session_service.rs
//
// Session identity provider
//
// Owns the current session for the whole application. Trackers never read
// the stored session themselves; they ask this service through
// `SessionSource`, which is where identity absence becomes `NoIdentity`.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Identity, Session};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionChanged};
use crate::infrastructure::Clock;
use crate::integrations::{IdentityProvider, SignUpOutcome};
use crate::repositories::SessionRepository;

/// Source of the signed-in session for the remote trackers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// The current session with a usable access token, or `NoIdentity`
    async fn active_session(&self) -> AppResult<Session>;
}

/// What a sign-up produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignUpResult {
    SignedIn { identity: Identity },
    ConfirmationRequired { email: String },
}

pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,
    session_repo: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<EventBus>,
    current: RwLock<Option<Session>>,
}

impl SessionService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        session_repo: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            session_repo,
            clock,
            event_bus,
            current: RwLock::new(None),
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// The stored access token is checked against the provider first; when
    /// it is rejected (or already expired) the refresh token is exchanged.
    /// If both fail the stored record is discarded and the app starts
    /// signed out.
    pub async fn initialize(&self) -> AppResult<Option<Identity>> {
        let stored = match self.session_repo.load() {
            Ok(stored) => stored,
            Err(AppError::Serialization(e)) => {
                log::warn!("Discarding unreadable stored session: {}", e);
                self.session_repo.clear()?;
                None
            }
            Err(e) => return Err(e),
        };

        let Some(stored) = stored else {
            log::debug!("No stored session");
            return Ok(None);
        };

        if !stored.is_expired(self.clock.now()) {
            match self.provider.get_user(&stored.access_token).await {
                Ok(identity) => {
                    let session = Session { identity, ..stored };
                    let identity = session.identity.clone();
                    self.install(session)?;
                    log::info!("Restored session for {}", identity.email);
                    return Ok(Some(identity));
                }
                Err(e) => log::warn!("Stored access token rejected: {}", e),
            }
        }

        match self.provider.refresh(&stored.refresh_token).await {
            Ok(session) => {
                let identity = session.identity.clone();
                self.install(session)?;
                log::info!("Refreshed session for {}", identity.email);
                Ok(Some(identity))
            }
            Err(e) => {
                log::warn!("Session refresh failed, signing out: {}", e);
                self.session_repo.clear()?;
                self.replace(None);
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Identity> {
        validate_credentials(email, password)?;

        let session = self.provider.sign_in(email.trim(), password).await?;
        let identity = session.identity.clone();
        self.install(session)?;

        log::info!("Signed in as {}", identity.email);
        Ok(identity)
    }

    /// Create an account. The identity is only populated when the provider
    /// hands back a session straight away.
    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpResult> {
        validate_credentials(email, password)?;

        match self.provider.sign_up(email.trim(), password).await? {
            SignUpOutcome::SignedIn(session) => {
                let identity = session.identity.clone();
                self.install(session)?;
                log::info!("Signed up and signed in as {}", identity.email);
                Ok(SignUpResult::SignedIn { identity })
            }
            SignUpOutcome::ConfirmationRequired(identity) => {
                log::info!("Sign-up for {} awaits email confirmation", identity.email);
                Ok(SignUpResult::ConfirmationRequired {
                    email: identity.email,
                })
            }
        }
    }

    /// Revoke the session remotely (best effort) and forget it locally
    pub async fn sign_out(&self) -> AppResult<()> {
        let previous = self.snapshot();

        if let Some(session) = &previous {
            if let Err(e) = self.provider.sign_out(&session.access_token).await {
                log::warn!("Remote sign-out failed: {}", e);
            }
        }

        self.session_repo.clear()?;
        self.replace(None);
        log::info!("Signed out");
        Ok(())
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.snapshot().map(|session| session.identity)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.snapshot()
    }

    pub fn require_session(&self) -> AppResult<Session> {
        self.snapshot().ok_or(AppError::NoIdentity)
    }

    fn snapshot(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist and publish a new session
    fn install(&self, session: Session) -> AppResult<()> {
        self.session_repo.save(&session)?;
        self.replace(Some(session));
        Ok(())
    }

    fn replace(&self, session: Option<Session>) {
        let identity = session.as_ref().map(|s| s.identity.clone());
        let changed = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let changed = current.as_ref().map(|s| &s.identity) != identity.as_ref();
            *current = session;
            changed
        };

        if changed {
            let event = match identity {
                Some(identity) => SessionChanged::signed_in(identity),
                None => SessionChanged::signed_out(),
            };
            self.event_bus.emit(event);
        }
    }
}

#[async_trait]
impl SessionSource for SessionService {
    async fn active_session(&self) -> AppResult<Session> {
        let session = self.require_session()?;
        if !session.is_expired(self.clock.now()) {
            return Ok(session);
        }

        log::debug!("Access token expired, refreshing");
        match self.provider.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.install(refreshed.clone())?;
                Ok(refreshed)
            }
            Err(AppError::Auth { message }) => {
                log::warn!("Refresh token rejected, signing out: {}", message);
                self.session_repo.clear()?;
                self.replace(None);
                Err(AppError::NoIdentity)
            }
            Err(e) => Err(e),
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::testing::SteppingClock;
    use crate::integrations::backend::identity::MockIdentityProvider;
    use crate::repositories::fakes::InMemoryLocalStorage;
    use crate::repositories::LocalSessionRepository;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn identity(email: &str) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn session(access: &str, identity: Identity) -> Session {
        Session {
            access_token: access.to_string(),
            refresh_token: format!("{}-refresh", access),
            expires_at: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            identity,
        }
    }

    fn build_service(provider: MockIdentityProvider) -> (SessionService, Arc<LocalSessionRepository>, Arc<EventBus>) {
        let repo = Arc::new(LocalSessionRepository::new(Arc::new(InMemoryLocalStorage::new())));
        let bus = Arc::new(EventBus::new());
        let service = SessionService::new(
            Arc::new(provider),
            repo.clone(),
            Arc::new(SteppingClock::new()),
            bus.clone(),
        );
        (service, repo, bus)
    }

    #[tokio::test]
    async fn test_sign_in_persists_session_and_emits() {
        let reader = identity("reader@example.com");
        let issued = session("access", reader.clone());

        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .times(1)
            .returning(move |_, _| Ok(issued.clone()));

        let (service, repo, bus) = build_service(provider);
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = changes.clone();
        bus.subscribe::<SessionChanged, _>(move |event| {
            assert!(event.is_signed_in());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let signed_in = service.sign_in("reader@example.com", "secret").await.unwrap();

        assert_eq!(signed_in, reader);
        assert_eq!(service.current_identity(), Some(reader));
        assert_eq!(repo.load().unwrap().unwrap().access_token, "access");
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_in_rejection_leaves_identity_empty() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_sign_in().returning(|_, _| {
            Err(AppError::Auth {
                message: "Invalid login credentials".to_string(),
            })
        });

        let (service, repo, _) = build_service(provider);
        let result = service.sign_in("reader@example.com", "wrong").await;

        assert!(matches!(result, Err(AppError::Auth { .. })));
        assert!(service.current_identity().is_none());
        assert!(repo.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected_before_provider() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_sign_in().never();

        let (service, _, _) = build_service(provider);
        let result = service.sign_in("   ", "secret").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sign_up_without_session_keeps_identity_empty() {
        let pending = identity("new@example.com");
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_up()
            .returning(move |_, _| Ok(SignUpOutcome::ConfirmationRequired(pending.clone())));

        let (service, _, _) = build_service(provider);
        let result = service.sign_up("new@example.com", "secret").await.unwrap();

        assert_eq!(
            result,
            SignUpResult::ConfirmationRequired {
                email: "new@example.com".to_string()
            }
        );
        assert!(service.current_identity().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_existing_account_surfaces_already_registered() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_up()
            .returning(|_, _| Err(AppError::AlreadyRegistered));

        let (service, _, _) = build_service(provider);
        let result = service.sign_up("reader@example.com", "secret").await;

        assert!(matches!(result, Err(AppError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_remote_revoke_fails() {
        let reader = identity("reader@example.com");
        let issued = session("access", reader);

        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .returning(move |_, _| Ok(issued.clone()));
        provider.expect_sign_out().times(1).returning(|_| {
            Err(AppError::Remote {
                service: "Backend",
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (service, repo, bus) = build_service(provider);
        service.sign_in("reader@example.com", "secret").await.unwrap();
        bus.clear_event_log();

        service.sign_out().await.unwrap();

        assert!(service.current_identity().is_none());
        assert!(repo.load().unwrap().is_none());
        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "SessionChanged");
    }

    #[tokio::test]
    async fn test_initialize_restores_valid_session() {
        let reader = identity("reader@example.com");
        let stored = session("stored", reader.clone());

        let mut provider = MockIdentityProvider::new();
        let user = reader.clone();
        provider.expect_get_user().times(1).returning(move |token| {
            assert_eq!(token, "stored");
            Ok(user.clone())
        });
        provider.expect_refresh().never();

        let (service, repo, _) = build_service(provider);
        repo.save(&stored).unwrap();

        let restored = service.initialize().await.unwrap();
        assert_eq!(restored, Some(reader));
    }

    #[tokio::test]
    async fn test_initialize_falls_back_to_refresh() {
        let reader = identity("reader@example.com");
        let stored = session("stale", reader.clone());
        let refreshed = session("fresh", reader.clone());

        let mut provider = MockIdentityProvider::new();
        provider.expect_get_user().returning(|_| {
            Err(AppError::Auth {
                message: "JWT expired".to_string(),
            })
        });
        provider.expect_refresh().times(1).returning(move |token| {
            assert_eq!(token, "stale-refresh");
            Ok(refreshed.clone())
        });

        let (service, repo, _) = build_service(provider);
        repo.save(&stored).unwrap();

        assert_eq!(service.initialize().await.unwrap(), Some(reader));
        assert_eq!(repo.load().unwrap().unwrap().access_token, "fresh");
    }

    #[tokio::test]
    async fn test_initialize_clears_stale_record() {
        let stored = session("stale", identity("reader@example.com"));

        let mut provider = MockIdentityProvider::new();
        provider.expect_get_user().returning(|_| {
            Err(AppError::Auth {
                message: "JWT expired".to_string(),
            })
        });
        provider.expect_refresh().returning(|_| {
            Err(AppError::Auth {
                message: "Invalid Refresh Token".to_string(),
            })
        });

        let (service, repo, _) = build_service(provider);
        repo.save(&stored).unwrap();

        assert_eq!(service.initialize().await.unwrap(), None);
        assert!(repo.load().unwrap().is_none());
        assert!(matches!(service.require_session(), Err(AppError::NoIdentity)));
    }

    #[tokio::test]
    async fn test_initialize_without_stored_session() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_get_user().never();
        provider.expect_refresh().never();

        let (service, _, _) = build_service(provider);
        assert_eq!(service.initialize().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_active_session_requires_identity() {
        let provider = MockIdentityProvider::new();
        let (service, _, _) = build_service(provider);

        assert!(matches!(
            service.active_session().await,
            Err(AppError::NoIdentity)
        ));
    }

    #[tokio::test]
    async fn test_active_session_refreshes_expired_token() {
        let reader = identity("reader@example.com");
        let mut expired = session("old", reader.clone());
        expired.expires_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let mut fresh = session("new", reader);
        fresh.expires_at = Some(Utc::now() + Duration::hours(1));

        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .returning(move |_, _| Ok(expired.clone()));
        provider
            .expect_refresh()
            .times(1)
            .returning(move |_| Ok(fresh.clone()));

        let (service, _, _) = build_service(provider);
        service.sign_in("reader@example.com", "secret").await.unwrap();

        let active = service.active_session().await.unwrap();
        assert_eq!(active.access_token, "new");
    }

    #[tokio::test]
    async fn test_rejected_refresh_signs_out() {
        let reader = identity("reader@example.com");
        let mut expired = session("old", reader);
        expired.expires_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .returning(move |_, _| Ok(expired.clone()));
        provider.expect_refresh().times(1).returning(|_| {
            Err(AppError::Auth {
                message: "Invalid Refresh Token".to_string(),
            })
        });

        let (service, repo, bus) = build_service(provider);
        service.sign_in("reader@example.com", "secret").await.unwrap();
        bus.clear_event_log();

        assert!(matches!(
            service.active_session().await,
            Err(AppError::NoIdentity)
        ));
        assert!(service.current_identity().is_none());
        assert!(repo.load().unwrap().is_none());
        assert_eq!(bus.get_event_log()[0].event_type, "SessionChanged");

        // signed out now, so no second refresh attempt
        assert!(matches!(
            service.active_session().await,
            Err(AppError::NoIdentity)
        ));
    }

    #[tokio::test]
    async fn test_refresh_transport_failure_keeps_session() {
        let reader = identity("reader@example.com");
        let mut expired = session("old", reader.clone());
        expired.expires_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .returning(move |_, _| Ok(expired.clone()));
        provider.expect_refresh().returning(|_| {
            Err(AppError::Remote {
                service: "Backend",
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let (service, repo, _) = build_service(provider);
        service.sign_in("reader@example.com", "secret").await.unwrap();

        assert!(matches!(
            service.active_session().await,
            Err(AppError::Remote { status: 503, .. })
        ));
        assert_eq!(service.current_identity(), Some(reader));
        assert!(repo.load().unwrap().is_some());
    }
}

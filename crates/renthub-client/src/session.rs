// Session store
//
// Single owner of the client's Session record. Construct one SessionHandle at
// the composition root and clone it everywhere; consumers read state through
// watch subscriptions and mutate it only through the operations below.
//
// Overlapping login-class operations are sequenced: every attempt takes a
// monotonically increasing number when it starts, and its result is discarded
// at settle time unless it is still the latest attempt issued. The last
// attempt the user started wins, regardless of network timing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use renthub_core::{
    AuthError, LoginCredentials, PasswordChange, ProfileUpdate, RegisterInfo, Result, Session,
    TokenClaims, UserProfile,
};

use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::gateway::AuthGateway;

struct SessionInner {
    gateway: AuthGateway,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    /// Number of the latest login-class attempt issued
    attempt: Mutex<u64>,
    initialized: AtomicBool,
}

/// Cloneable handle to the process-wide session store
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl SessionHandle {
    pub fn new(gateway: AuthGateway, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::loading());
        Self {
            inner: Arc::new(SessionInner {
                gateway,
                credentials,
                state,
                attempt: Mutex::new(0),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    /// Build a handle with a file-backed credential store
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            AuthGateway::new(&config.api_base_url),
            Arc::new(FileCredentialStore::new(config.credentials_path.clone())),
        )
    }

    /// Subscribe to session state changes. The receiver immediately holds the
    /// current state.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current session state
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// The gateway this session talks through
    pub fn gateway(&self) -> &AuthGateway {
        &self.inner.gateway
    }

    /// Restore the session from the persisted credential. Runs once at
    /// startup; later calls return the current state untouched.
    ///
    /// An absent, expired, or unparseable token settles into the logged-out
    /// state without a network call; a live token is exchanged for the
    /// identity it belongs to, and purged from storage if the server rejects
    /// it.
    pub async fn initialize(&self) -> Session {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("session already initialized");
            return self.current();
        }

        let seq = self.begin_attempt();
        let next = self.restore_session().await;
        self.settle(seq, move |s| *s = next);
        self.current()
    }

    async fn restore_session(&self) -> Session {
        let token = match self.inner.credentials.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!("failed to read persisted credential: {e:#}");
                None
            }
        };
        let Some(token) = token else {
            return Session::unauthenticated();
        };

        let expired = match TokenClaims::decode(&token) {
            Ok(claims) => claims.is_expired(),
            Err(e) => {
                debug!("persisted token unparseable, discarding: {e}");
                true
            }
        };
        if expired {
            self.purge_credential().await;
            return Session::unauthenticated();
        }

        match self.inner.gateway.current_user(&token).await {
            Ok(user) => Session::authenticated(user, token),
            Err(err) => {
                info!("persisted credential rejected: {err}");
                self.purge_credential().await;
                Session::failed(err.to_string())
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// The login response carries only the token; resolving it to an identity
    /// takes a second round trip. The token is persisted only if this attempt
    /// is still the latest when it settles.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile> {
        let seq = self.begin_attempt();
        match self.try_login(credentials).await {
            Ok((user, token)) => {
                let session = Session::authenticated(user.clone(), token.clone());
                if self.settle(seq, move |s| *s = session) {
                    if let Err(e) = self.inner.credentials.save(&token).await {
                        warn!("failed to persist credential: {e:#}");
                    }
                }
                Ok(user)
            }
            Err(err) => {
                let message = err.to_string();
                self.settle(seq, move |s| *s = Session::failed(message));
                Err(err)
            }
        }
    }

    async fn try_login(&self, credentials: &LoginCredentials) -> Result<(UserProfile, String)> {
        let token = self.inner.gateway.login(credentials).await?;
        let user = self.inner.gateway.current_user(&token).await?;
        Ok((user, token))
    }

    /// Create an account. Never establishes a session; callers navigate to
    /// login afterwards. A failure records its message without disturbing
    /// whatever session already exists.
    pub async fn register(&self, info: &RegisterInfo) -> Result<UserProfile> {
        let seq = self.begin_attempt();
        match self.inner.gateway.register(info).await {
            Ok(user) => {
                self.settle(seq, |s| s.is_loading = false);
                Ok(user)
            }
            Err(err) => {
                let message = err.to_string();
                self.settle(seq, move |s| {
                    s.is_loading = false;
                    s.error = Some(message);
                });
                Err(err)
            }
        }
    }

    /// Finish a third-party login: the identity provider redirected back to
    /// the app with a token in hand. The token is persisted once it resolves
    /// to an identity.
    pub async fn complete_external_login(&self, token: &str) -> Result<UserProfile> {
        let seq = self.begin_attempt();
        match self.inner.gateway.current_user(token).await {
            Ok(user) => {
                let session = Session::authenticated(user.clone(), token);
                if self.settle(seq, move |s| *s = session) {
                    if let Err(e) = self.inner.credentials.save(token).await {
                        warn!("failed to persist credential: {e:#}");
                    }
                }
                Ok(user)
            }
            Err(err) => {
                let message = err.to_string();
                self.settle(seq, move |s| *s = Session::failed(message));
                Err(err)
            }
        }
    }

    /// Drop the session and the persisted credential. Never fails; a storage
    /// error is logged and the in-memory state is cleared regardless.
    ///
    /// Logout also invalidates any in-flight login-class attempt, so a stale
    /// response cannot resurrect the session afterwards.
    pub async fn logout(&self) {
        let seq = self.next_attempt();
        self.purge_credential().await;
        self.settle(seq, |s| *s = Session::unauthenticated());
    }

    /// Update the signed-in account's profile. Requires a session.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let token = self.require_token()?;
        match self.inner.gateway.update_profile(&token, update).await {
            Ok(user) => {
                let refreshed = user.clone();
                self.inner.state.send_modify(move |s| {
                    if s.user.is_some() {
                        s.user = Some(refreshed);
                    }
                });
                Ok(user)
            }
            Err(err) => Err(self.fail_authenticated(err).await),
        }
    }

    /// Change the signed-in account's password. Requires a session.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        let token = self.require_token()?;
        match self.inner.gateway.change_password(&token, change).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail_authenticated(err).await),
        }
    }

    /// A 401 on any authenticated call means the credential is dead; force a
    /// logout before surfacing the error so stale state never lingers.
    async fn fail_authenticated(&self, err: AuthError) -> AuthError {
        if err.is_authentication() {
            info!("credential rejected by the server, clearing session");
            self.logout().await;
        }
        err
    }

    fn require_token(&self) -> Result<String> {
        self.inner
            .state
            .borrow()
            .token
            .clone()
            .ok_or_else(|| AuthError::authentication("not authenticated"))
    }

    async fn purge_credential(&self) {
        if let Err(e) = self.inner.credentials.clear().await {
            warn!("failed to clear persisted credential: {e:#}");
        }
    }

    /// Start a login-class attempt: take the next sequence number and publish
    /// the transitional loading state.
    fn begin_attempt(&self) -> u64 {
        let seq = self.next_attempt();
        self.inner.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        seq
    }

    fn next_attempt(&self) -> u64 {
        let mut attempt = self.inner.attempt.lock().unwrap();
        *attempt += 1;
        *attempt
    }

    /// Apply a settled result if the attempt is still the latest issued.
    /// Returns false when a newer attempt has superseded this one.
    fn settle(&self, seq: u64, apply: impl FnOnce(&mut Session)) -> bool {
        let attempt = self.inner.attempt.lock().unwrap();
        if *attempt != seq {
            debug!(seq, latest = *attempt, "discarding stale attempt result");
            return false;
        }
        self.inner.state.send_modify(apply);
        true
    }
}

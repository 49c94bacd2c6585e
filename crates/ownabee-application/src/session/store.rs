use std::sync::Arc;

use async_trait::async_trait;
use ownabee_client::{AuthEventHandler, PortalApi};
use ownabee_core::auth::{AuthTokens, LoginResponse, PinLoginRequest, User};
use ownabee_core::error::{PortalError, Result};
use ownabee_core::portal::PortalInfo;
use ownabee_core::session::{RouteGuard, Session, SessionStorage};
use tokio::sync::{Mutex, RwLock};

/// What [`SessionStore::initialize`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitializeOutcome {
    /// Called before hydration; nothing happened.
    NotHydrated,
    /// An earlier call already initialized the store.
    AlreadyInitialized,
    /// No stored tokens; initialized as signed out.
    Anonymous,
    /// Stored tokens were valid and portal info was loaded.
    Authenticated,
    /// Stored tokens were rejected; the session was cleared.
    LoggedOut { reason: PortalError },
}

/// State shared with the API client's auth callbacks.
///
/// Kept separate from [`SessionStore`] so the client can hold it without
/// the store and the client owning each other.
struct SessionShared {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionShared {
    async fn persist(&self, session: &Session) -> Result<()> {
        self.storage.save(&session.to_persisted()).await
    }

    async fn store_tokens(&self, tokens: AuthTokens) -> Result<()> {
        let mut state = self.state.write().await;
        state.tokens = Some(tokens);
        self.persist(&state).await
    }

    async fn clear(&self) {
        let mut state = self.state.write().await;
        state.clear_identity();
        if let Err(e) = self.storage.clear().await {
            tracing::warn!("[SessionStore] Failed to clear stored session: {}", e);
        }
    }
}

#[async_trait]
impl AuthEventHandler for SessionShared {
    async fn on_tokens_changed(&self, tokens: AuthTokens) {
        if let Err(e) = self.store_tokens(tokens).await {
            tracing::warn!("[SessionStore] Failed to persist refreshed tokens: {}", e);
        }
    }

    async fn on_auth_error(&self) {
        tracing::info!("[SessionStore] Session expired, signing out");
        self.clear().await;
    }
}

/// Client-side session: identity, tokens and portal info.
///
/// The store is an explicit object handed to whoever needs it. It registers
/// itself with the API client on construction so refreshed tokens are
/// persisted and a failed refresh signs the user out.
pub struct SessionStore {
    shared: Arc<SessionShared>,
    api: PortalApi,
    /// Serializes `initialize`.
    init_gate: Mutex<()>,
}

impl SessionStore {
    pub async fn new(api: PortalApi, storage: Arc<dyn SessionStorage>) -> Self {
        let shared = Arc::new(SessionShared {
            state: RwLock::new(Session::default()),
            storage,
        });
        api.client().set_event_handler(shared.clone()).await;
        Self {
            shared,
            api,
            init_gate: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &PortalApi {
        &self.api
    }

    /// Immutable copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.shared.state.read().await.clone()
    }

    pub async fn route_guard(&self) -> RouteGuard {
        RouteGuard::evaluate(&*self.shared.state.read().await)
    }

    /// Restores the persisted session into memory and into the client.
    ///
    /// An unreadable blob is logged and treated as empty.
    pub async fn hydrate(&self) {
        let persisted = match self.shared.storage.load().await {
            Ok(persisted) => persisted.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("[SessionStore] Ignoring unreadable stored session: {}", e);
                Default::default()
            }
        };
        let tokens = persisted.tokens();

        let mut state = self.shared.state.write().await;
        self.api.client().set_tokens(tokens.clone()).await;
        state.user = persisted.user;
        state.tokens = tokens;
        state.is_hydrated = true;
        tracing::debug!(
            "[SessionStore] Hydrated (tokens present: {})",
            state.tokens.is_some()
        );
    }

    /// Validates stored tokens against the API, once per store.
    ///
    /// No-op before hydration. Concurrent callers wait for the first one
    /// and then observe `AlreadyInitialized`.
    pub async fn initialize(&self) -> InitializeOutcome {
        let _gate = self.init_gate.lock().await;

        let (hydrated, initialized, has_tokens) = {
            let state = self.shared.state.read().await;
            (state.is_hydrated, state.is_initialized, state.tokens.is_some())
        };
        if !hydrated {
            return InitializeOutcome::NotHydrated;
        }
        if initialized {
            return InitializeOutcome::AlreadyInitialized;
        }

        let outcome = if has_tokens {
            match self.api.me().await {
                Ok(me) => {
                    let mut state = self.shared.state.write().await;
                    state.user = Some(me.user);
                    state.portal_info = Some(me.portal_info);
                    if let Err(e) = self.shared.persist(&state).await {
                        tracing::warn!("[SessionStore] Failed to persist session: {}", e);
                    }
                    InitializeOutcome::Authenticated
                }
                Err(e) => {
                    tracing::info!("[SessionStore] Stored session rejected: {}", e);
                    self.logout().await;
                    InitializeOutcome::LoggedOut { reason: e }
                }
            }
        } else {
            InitializeOutcome::Anonymous
        };

        self.shared.state.write().await.is_initialized = true;
        outcome
    }

    /// Installs a fresh login. The session is stored first; if that fails
    /// neither the in-memory session nor the client changes.
    pub async fn set_auth(&self, user: User, tokens: AuthTokens) -> Result<()> {
        let mut state = self.shared.state.write().await;
        let mut next = state.clone();
        next.user = Some(user);
        next.tokens = Some(tokens.clone());
        self.shared.persist(&next).await?;

        self.api.client().set_tokens(Some(tokens)).await;
        *state = next;
        Ok(())
    }

    /// Replaces the token pair without touching the user.
    pub async fn update_tokens(&self, tokens: AuthTokens) -> Result<()> {
        self.api.client().set_tokens(Some(tokens.clone())).await;
        self.shared.store_tokens(tokens).await
    }

    /// Clears identity, tokens and durable storage. `is_initialized` is
    /// left as is.
    pub async fn logout(&self) {
        self.api.client().clear_tokens().await;
        self.shared.clear().await;
        tracing::info!("[SessionStore] Signed out");
    }

    /// Reloads user and portal info for the current tokens.
    pub async fn refresh_portal_info(&self) -> Result<PortalInfo> {
        let me = self.api.me().await?;
        let mut state = self.shared.state.write().await;
        let mut next = state.clone();
        next.user = Some(me.user);
        next.portal_info = Some(me.portal_info.clone());
        self.shared.persist(&next).await?;
        *state = next;
        Ok(me.portal_info)
    }

    /// Email + PIN login. Input is validated before any request is sent.
    pub async fn login_with_pin(&self, email: &str, pin: &str) -> Result<User> {
        let request = PinLoginRequest::new(email, pin)?;
        let response = self.api.login_with_pin(&request).await?;
        self.complete_login(response).await
    }

    /// Identity-provider login with a credential obtained elsewhere.
    pub async fn login_with_google(&self, credential: &str) -> Result<User> {
        if credential.trim().is_empty() {
            return Err(PortalError::validation("Missing sign-in credential"));
        }
        let response = self.api.login_with_google(credential).await?;
        self.complete_login(response).await
    }

    async fn complete_login(&self, response: LoginResponse) -> Result<User> {
        let LoginResponse { tokens, user } = response;
        self.set_auth(user, tokens).await?;

        if let Err(e) = self.refresh_portal_info().await {
            tracing::warn!("[SessionStore] Could not load portal info after login: {}", e);
        }

        let mut state = self.shared.state.write().await;
        state.is_hydrated = true;
        state.is_initialized = true;
        tracing::info!("[SessionStore] Signed in");
        state
            .user
            .clone()
            .ok_or_else(|| PortalError::internal("Session has no user after login"))
    }
}

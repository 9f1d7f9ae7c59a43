//! Client composition root
//!
//! [`ClientApp`] owns one [`SessionStore`] and everything that shares it:
//! the request pipeline, the auth gateway, and the navigator whose cookie jar
//! the store writes. Built once with [`ClientApp::init`], flushed with
//! [`ClientApp::teardown`].

use std::sync::{Arc, Mutex, PoisonError};

use recipehub_auth::{AuthConfig, IdentityClaims, Role, TokenCodec};
use recipehub_common::{unix_now, Config};
use recipehub_session::{FileStore, KeyValueStore, SessionPhase, SessionState, SessionStore};

use crate::auth_api::{AuthApi, AuthGateway, SignInRequest, SignUpRequest};
use crate::cookies::SiteCookieJar;
use crate::navigator::{PageLoad, SiteNavigator};
use crate::notify::{Notifier, TracingNotifier};
use crate::pipeline::ApiClient;
use crate::{ApiError, ClientConfig, ClientError};

pub struct ClientApp {
    session: SessionStore,
    api: Arc<ApiClient>,
    auth: Arc<dyn AuthGateway>,
    cookies: SiteCookieJar,
    navigator: SiteNavigator,
    /// Ticket of the most recent sign-in; only it may commit
    latest_sign_in: Mutex<u64>,
}

impl std::fmt::Debug for ClientApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientApp")
            .field("session", &self.session)
            .field("api", &self.api)
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}

impl ClientApp {
    /// Wire the client from environment configuration.
    ///
    /// Persists to a [`FileStore`] at `session_storage_path` and reports
    /// failures through [`TracingNotifier`].
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let storage = FileStore::new(config.session_storage_path.clone());
        tracing::debug!(path = %storage.path().display(), "Using file-backed session storage");

        Self::init(
            &ClientConfig::from_config(config),
            TokenCodec::new(&AuthConfig::from_config(config)),
            Arc::new(storage),
            Arc::new(TracingNotifier),
        )
    }

    /// Wire the client and revalidate whatever session was persisted.
    pub fn init(
        config: &ClientConfig,
        codec: TokenCodec,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let cookies = SiteCookieJar::new(&config.site_url)?;
        let session = SessionStore::init(codec, storage.clone(), Arc::new(cookies.clone()));
        let api = Arc::new(ApiClient::new(config, storage, notifier)?);
        let auth: Arc<dyn AuthGateway> = Arc::new(AuthApi::new(api.clone()));
        let navigator = SiteNavigator::new(&config.site_url, cookies.jar(), config.timeout)?;

        let phase = session.reconcile(unix_now());
        tracing::info!(
            api_base_url = %api.base_url(),
            site_url = %navigator.site_url(),
            %phase,
            "Client initialized"
        );

        Ok(Self {
            session,
            api,
            auth,
            cookies,
            navigator,
            latest_sign_in: Mutex::new(0),
        })
    }

    /// Replace the HTTP auth gateway.
    pub fn with_auth_gateway(mut self, auth: Arc<dyn AuthGateway>) -> Self {
        self.auth = auth;
        self
    }

    /// Exchange credentials for a token and establish the session.
    ///
    /// When sign-ins overlap, the one started last wins; earlier attempts
    /// return [`ClientError::SignInSuperseded`] without touching the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityClaims, ClientError> {
        let ticket = self.next_ticket();

        let response = self
            .auth
            .login(SignInRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.commit_sign_in(ticket, &response.token)
    }

    /// Create an account. The session is untouched; the new user signs in next.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<serde_json::Value, ClientError> {
        Ok(self.auth.register(request).await?)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<serde_json::Value, ClientError> {
        Ok(self.auth.forgot_password(email).await?)
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<serde_json::Value, ClientError> {
        Ok(self.auth.reset_password(token, new_password).await?)
    }

    /// Revoke the session. Pending sign-ins are superseded.
    pub fn sign_out(&self) {
        self.next_ticket();
        self.session.revoke();
    }

    pub fn reconcile(&self) -> SessionPhase {
        self.session.reconcile(unix_now())
    }

    /// Load a site page with the session's cookie.
    pub async fn open(&self, path: &str) -> Result<PageLoad, ApiError> {
        self.navigator.navigate(path).await
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn current_user(&self) -> Option<IdentityClaims> {
        self.session.current_user()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cookies(&self) -> &SiteCookieJar {
        &self.cookies
    }

    pub fn teardown(self) {
        self.session.teardown();
        tracing::info!("Client torn down");
    }

    fn next_ticket(&self) -> u64 {
        let mut latest = self
            .latest_sign_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *latest += 1;
        *latest
    }

    fn commit_sign_in(&self, ticket: u64, token: &str) -> Result<IdentityClaims, ClientError> {
        // Held through establish so a newer attempt cannot commit in between
        let latest = self
            .latest_sign_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if *latest != ticket {
            tracing::warn!(ticket, latest = *latest, "Discarding superseded sign-in");
            return Err(ClientError::SignInSuperseded);
        }

        Ok(self.session.establish(token)?)
    }
}

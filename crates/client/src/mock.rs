//! Mock collaborators
//!
//! Record calls in memory for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth_api::{AuthGateway, SignInRequest, SignInResponse, SignUpRequest};
use crate::notify::Notifier;
use crate::ApiError;

/// Notifier recording every message shown to the user.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all recorded messages.
    pub fn recorded_messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("messages lock poisoned — prior test panicked")
            .clone()
    }

    /// Clear all recorded messages.
    pub fn reset(&self) {
        self.messages
            .lock()
            .expect("messages lock poisoned — prior test panicked")
            .clear();
    }
}

impl Notifier for MockNotifier {
    fn error(&self, message: &str) {
        tracing::debug!(message, "Mock notifier: recording message");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    token: String,
    delay: Duration,
}

/// Auth gateway answering from a table of known accounts.
///
/// Unknown credentials get a 401, like the real API.
#[derive(Debug, Clone, Default)]
pub struct MockAuthGateway {
    accounts: Arc<Mutex<HashMap<String, MockAccount>>>,
    logins: Arc<Mutex<Vec<String>>>,
    registrations: Arc<Mutex<Vec<SignUpRequest>>>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account whose login returns `token`.
    pub fn with_account(self, email: &str, password: &str, token: &str) -> Self {
        self.with_slow_account(email, password, token, Duration::ZERO)
    }

    /// Like [`MockAuthGateway::with_account`], but the login call takes `delay`.
    pub fn with_slow_account(self, email: &str, password: &str, token: &str, delay: Duration) -> Self {
        self.accounts
            .lock()
            .expect("accounts lock poisoned — prior test panicked")
            .insert(
                email.to_string(),
                MockAccount {
                    password: password.to_string(),
                    token: token.to_string(),
                    delay,
                },
            );
        self
    }

    /// Emails of every login attempt, in call order.
    pub fn recorded_logins(&self) -> Vec<String> {
        self.logins
            .lock()
            .expect("logins lock poisoned — prior test panicked")
            .clone()
    }

    pub fn recorded_registrations(&self) -> Vec<SignUpRequest> {
        self.registrations
            .lock()
            .expect("registrations lock poisoned — prior test panicked")
            .clone()
    }

    fn lock_poisoned(what: &str) -> ApiError {
        ApiError::NetworkOrServer {
            status: None,
            message: format!("{what} lock poisoned"),
        }
    }
}

#[async_trait::async_trait]
impl AuthGateway for MockAuthGateway {
    async fn login(&self, request: SignInRequest) -> Result<SignInResponse, ApiError> {
        tracing::debug!(email = %request.email, "Mock auth: recording login");
        self.logins
            .lock()
            .map_err(|_| Self::lock_poisoned("logins"))?
            .push(request.email.clone());

        let account = self
            .accounts
            .lock()
            .map_err(|_| Self::lock_poisoned("accounts"))?
            .get(&request.email)
            .cloned();

        match account {
            Some(account) if account.password == request.password => {
                if !account.delay.is_zero() {
                    tokio::time::sleep(account.delay).await;
                }
                Ok(SignInResponse {
                    token: account.token,
                })
            }
            _ => Err(ApiError::Client {
                status: 401,
                body: r#"{"message":"Invalid credentials"}"#.to_string(),
            }),
        }
    }

    async fn register(&self, request: SignUpRequest) -> Result<serde_json::Value, ApiError> {
        let created = serde_json::json!({ "user": { "name": request.name, "email": request.email } });
        self.registrations
            .lock()
            .map_err(|_| Self::lock_poisoned("registrations"))?
            .push(request);
        Ok(created)
    }

    async fn forgot_password(&self, email: &str) -> Result<serde_json::Value, ApiError> {
        Ok(serde_json::json!({ "message": format!("Reset link sent to {email}") }))
    }

    async fn reset_password(
        &self,
        _token: &str,
        _new_password: &str,
    ) -> Result<serde_json::Value, ApiError> {
        Ok(serde_json::json!({ "message": "Password updated" }))
    }
}

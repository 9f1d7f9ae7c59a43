//! Auth API calls
//!
//! Sign-in returns the bearer token the session is established with; the
//! other calls are plain collaborator calls whose payloads the core does not
//! interpret.

use std::sync::Arc;

use recipehub_auth::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pipeline::ApiClient;
use crate::ApiError;

#[derive(Clone, Serialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub token: String,
}

#[derive(Clone, Serialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Serialize, Validate)]
struct ForgotPasswordRequest<'a> {
    #[validate(email)]
    email: &'a str,
}

#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    #[validate(length(min = 1))]
    token: &'a str,
    #[validate(length(min = 1))]
    new_password: &'a str,
}

/// Auth endpoints of the recipe API
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, request: SignInRequest) -> Result<SignInResponse, ApiError>;

    /// Create an account; the response is the API's created-user confirmation.
    async fn register(&self, request: SignUpRequest) -> Result<serde_json::Value, ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<serde_json::Value, ApiError>;

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<serde_json::Value, ApiError>;
}

/// HTTP implementation over the authenticated pipeline
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl AuthGateway for AuthApi {
    async fn login(&self, request: SignInRequest) -> Result<SignInResponse, ApiError> {
        request.validate()?;
        let response: SignInResponse = self.api.post("/auth/login", &request).await?;
        tracing::debug!(email = %request.email, "Sign-in accepted");
        Ok(response)
    }

    async fn register(&self, request: SignUpRequest) -> Result<serde_json::Value, ApiError> {
        request.validate()?;
        self.api.post("/auth/register", &request).await
    }

    async fn forgot_password(&self, email: &str) -> Result<serde_json::Value, ApiError> {
        let request = ForgotPasswordRequest { email };
        request.validate()?;
        self.api.post("/auth/forgot-password", &request).await
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let request = ResetPasswordRequest {
            token,
            new_password,
        };
        request.validate()?;
        self.api.post("/auth/reset-password", &request).await
    }
}

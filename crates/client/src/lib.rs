//! RecipeHub API client
//!
//! Provides the client half of the session core:
//! - Authenticated request pipeline attaching the persisted bearer token
//! - Auth API calls (sign-in, sign-up, password reset) behind a trait, with a mock
//! - Site navigator performing page loads through the session's cookie jar
//! - `ClientApp` composition root owning the session store

pub mod app;
pub mod auth_api;
pub mod cookies;
pub mod mock;
pub mod navigator;
pub mod notify;
pub mod pipeline;

use std::time::Duration;

use recipehub_common::Config;
use recipehub_session::SessionError;
use thiserror::Error;

pub use app::ClientApp;
pub use auth_api::{AuthApi, AuthGateway, SignInRequest, SignInResponse, SignUpRequest};
pub use cookies::SiteCookieJar;
pub use navigator::{PageLoad, SiteNavigator};
pub use notify::{Notifier, TracingNotifier, GENERIC_ERROR_MESSAGE};
pub use pipeline::ApiClient;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API configuration error: {0}")]
    Configuration(String),

    /// 4xx from the API, left to the caller to render
    #[error("API rejected request with {status}: {body}")]
    Client { status: u16, body: String },

    /// Transport failure, 5xx, or an unreadable response
    #[error("API request failed: {message}")]
    NetworkOrServer {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } => Some(*status),
            ApiError::NetworkOrServer { status, .. } => *status,
            ApiError::Configuration(_) | ApiError::Validation(_) => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Client { .. })
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Sign-in superseded by a newer attempt")]
    SignInSuperseded,
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the recipe API (`.../api`)
    pub api_base_url: String,
    /// Site hosting the guarded pages; the access cookie is scoped to it
    pub site_url: String,
    /// Per-request timeout, single attempt
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            site_url: config.site_url.clone(),
            timeout: Duration::from_secs(config.api_timeout_secs),
        }
    }
}

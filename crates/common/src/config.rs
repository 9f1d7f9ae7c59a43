//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// HMAC secret shared with the API that issues bearer tokens
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Remote recipe API
    pub api_base_url: String,
    pub api_timeout_secs: u64,

    /// Public URL of the site hosting the guarded pages
    pub site_url: String,

    /// File backing the client-side key-value store
    pub session_storage_path: PathBuf,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("api_base_url", &self.api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("site_url", &self.site_url)
            .field("session_storage_path", &self.session_storage_path)
            .field("log_level", &self.log_level)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?;
        if jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        let config = Self {
            jwt_secret,
            jwt_issuer: env::var("JWT_ISSUER").ok(),
            jwt_audience: env::var("JWT_AUDIENCE").ok(),

            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/api".to_string()),
            api_timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            site_url: env::var("SITE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),

            session_storage_path: env::var("SESSION_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".recipehub/storage.json")),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "recipehub=debug".to_string()),
            port: port.parse().unwrap_or(3000),
        };

        tracing::debug!(
            api_base_url = %config.api_base_url,
            site_url = %config.site_url,
            port = config.port,
            "Configuration loaded from environment"
        );

        Ok(config)
    }
}

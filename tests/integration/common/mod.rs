//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests including:
//! - Test configuration loaded from `.env.test`
//! - Token minting with the site's secret
//! - A site server on a random local port
//! - Guard request helpers

#![allow(dead_code)]

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{
        header::{COOKIE, LOCATION},
        Request, StatusCode,
    },
    Router,
};
use recipehub_auth::{AuthConfig, IdentityClaims, Role, TokenCodec};
use recipehub_client::ClientConfig;
use recipehub_common::{unix_now, Config};
use tokio::task::JoinHandle;
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
        });

        Self {
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
            jwt_issuer: env::var("TEST_JWT_ISSUER").ok(),
        }
    }

    /// Site configuration pointing at `api_base_url`
    pub fn site_config(&self, api_base_url: &str, port: u16) -> Config {
        Config {
            jwt_secret: self.jwt_secret.clone(),
            jwt_issuer: self.jwt_issuer.clone(),
            jwt_audience: None,
            api_base_url: api_base_url.to_string(),
            api_timeout_secs: 5,
            site_url: format!("http://127.0.0.1:{port}"),
            session_storage_path: PathBuf::from("storage.json"),
            log_level: "debug".to_string(),
            rust_log: "recipehub=debug".to_string(),
            port,
        }
    }

    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: None,
        })
    }

    /// Sign a token for `role` expiring `ttl_secs` from now.
    pub fn token(&self, id: &str, role: Role, ttl_secs: i64) -> String {
        self.codec()
            .encode(&IdentityClaims {
                id: id.to_string(),
                name: format!("Test User {id}"),
                email: format!("{id}@recipehub.test"),
                role: vec![role],
                exp: Some(unix_now() + ttl_secs),
            })
            .expect("token signing should not fail")
    }

    /// Same identity, signed with a secret the site does not trust
    pub fn forged_token(&self, id: &str, role: Role) -> String {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "attacker-secret".to_string(),
            issuer: self.jwt_issuer.clone(),
            audience: None,
        })
        .encode(&IdentityClaims {
            id: id.to_string(),
            name: "Forged".to_string(),
            email: "forged@recipehub.test".to_string(),
            role: vec![role],
            exp: None,
        })
        .expect("token signing should not fail")
    }
}

/// Site router with the test secret
pub fn site_router(config: &TestConfig) -> Router {
    recipehub_app::create_app(&config.site_config("http://127.0.0.1:9/api", 0))
        .expect("site router should build")
}

/// Guard outcome for a single page load: status and `Location`, if any
pub async fn load_page(router: &Router, path: &str, token: Option<&str>) -> (StatusCode, Option<String>) {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={token}"));
    }

    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).expect("request should build"))
        .await
        .expect("router is infallible");

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

/// Site server on a random local port, stopped on drop
pub struct TestSite {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestSite {
    pub async fn spawn(config: &TestConfig, api_base_url: &str) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = recipehub_app::create_app(&config.site_config(api_base_url, addr.port()))?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test site stopped");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client_config(&self, api_base_url: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: api_base_url.to_string(),
            site_url: self.url(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

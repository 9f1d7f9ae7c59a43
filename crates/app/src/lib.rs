//! RecipeHub site composition root
//!
//! Mounts the site pages behind the route guard middleware.

mod pages;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use recipehub_auth::{route_guard, AuthConfig, RouteGuard, TokenCodec};
use recipehub_common::Config;

/// Create the site router with all pages and the route guard
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    if config.jwt_secret.is_empty() {
        return Err(anyhow::anyhow!("JWT secret must not be empty"));
    }

    let auth_config = AuthConfig::from_config(config);
    let guard = RouteGuard::new(TokenCodec::new(&auth_config));

    let app = Router::new()
        // Public
        .route("/", get(pages::home))
        .route("/signin", get(pages::sign_in))
        .route("/signup", get(pages::sign_up))
        .route("/forgot-password", get(pages::forgot_password))
        .route("/reset-password", get(pages::reset_password))
        // Signed in
        .route("/dashboard", get(pages::dashboard))
        .route("/recipe-catalog", get(pages::recipe_catalog))
        .route("/recipe-detail", get(pages::recipe_detail))
        .route("/recipe-editor", get(pages::recipe_editor))
        .route("/unauthorized", get(pages::unauthorized))
        // Admin
        .route("/admin/users", get(pages::admin_users))
        // Excluded prefixes, skipped by the guard
        .route("/favicon.ico", get(pages::favicon))
        .route("/robots.txt", get(pages::robots))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(guard, route_guard))
        // Mounted after the layer, never guarded
        .route("/health", get(health_check));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

//! Authentication core for RecipeHub
//!
//! Provides the bearer token codec, role model, and the route guard that
//! decides page access from the `token` cookie, plus its axum middleware.

pub mod cookie;
mod claims;
mod config;
mod error;
mod guard;
mod jwt;
mod middleware;
mod types;

pub use claims::IdentityClaims;
pub use config::AuthConfig;
pub use error::{AuthError, SIGN_IN_PATH, UNAUTHORIZED_PATH};
pub use guard::{GuardDecision, RouteGuard, ADMIN_PREFIX, EXCLUDED_PREFIXES, PUBLIC_ROUTES};
pub use jwt::{is_expired, TokenCodec};
pub use middleware::{route_guard, token_from_headers};
pub use types::Role;

//! Axum middleware running the route guard ahead of every page
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .layer(axum::middleware::from_fn_with_state(guard, route_guard));
//! ```

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use recipehub_common::unix_now;

use crate::cookie::{cookie_value, TOKEN_COOKIE};
use crate::guard::{GuardDecision, RouteGuard};

/// Raw access token from the request's `Cookie` headers, if any
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, TOKEN_COOKIE)
}

/// Allow the request through or answer with a 307 redirect.
pub async fn route_guard(State(guard): State<RouteGuard>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if RouteGuard::is_excluded(&path) {
        return next.run(request).await;
    }

    let token = token_from_headers(request.headers());

    match guard.evaluate(&path, token.as_deref(), unix_now()) {
        GuardDecision::Allow => {
            tracing::debug!(path = %path, has_token = token.is_some(), "Navigation allowed");
            next.run(request).await
        }
        GuardDecision::Redirect { location, reason } => {
            tracing::info!(
                path = %path,
                location,
                reason = %reason,
                session_invalid = reason.is_session_invalid(),
                "Navigation redirected"
            );
            Redirect::temporary(location).into_response()
        }
    }
}

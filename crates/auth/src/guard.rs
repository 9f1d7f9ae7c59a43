//! Route-level access policy
//!
//! Runs before any page is rendered and only ever looks at the raw token
//! from the access cookie; it shares no state with the client session.

use crate::claims::IdentityClaims;
use crate::error::AuthError;
use crate::jwt::TokenCodec;

/// Pages reachable without a session
pub const PUBLIC_ROUTES: &[&str] = &["/", "/signin", "/signup", "/forgot-password", "/reset-password"];

/// Paths under this prefix need the `Admin` role
pub const ADMIN_PREFIX: &str = "/admin";

/// First-segment prefixes the guard never sees: API routes, static assets
/// and well-known files.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "api",
    "static",
    "images",
    "favicon.ico",
    "robots.txt",
    "sitemap.xml",
];

/// Outcome of evaluating a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        location: &'static str,
        reason: AuthError,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { location, .. } => Some(location),
        }
    }
}

impl From<AuthError> for GuardDecision {
    fn from(reason: AuthError) -> Self {
        GuardDecision::Redirect {
            location: reason.redirect_path(),
            reason,
        }
    }
}

/// Route guard policy
#[derive(Debug, Clone)]
pub struct RouteGuard {
    codec: TokenCodec,
}

impl RouteGuard {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub fn is_public(path: &str) -> bool {
        PUBLIC_ROUTES.contains(&path)
    }

    /// Paths skipped entirely by the guard middleware.
    ///
    /// Matches on the raw prefix after the leading slash, so `/api`,
    /// `/api/recipes` and `/apix` are all excluded.
    pub fn is_excluded(path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| rest.starts_with(prefix))
    }

    pub fn is_admin_path(path: &str) -> bool {
        path.starts_with(ADMIN_PREFIX)
    }

    /// Resolve the identity allowed onto a protected `path`.
    pub fn authorize(
        &self,
        path: &str,
        token: Option<&str>,
        now: i64,
    ) -> Result<IdentityClaims, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = self.codec.decode_unexpired(token, now)?;

        if Self::is_admin_path(path) && !claims.is_admin() {
            return Err(AuthError::Unauthorized {
                path: path.to_string(),
            });
        }

        Ok(claims)
    }

    /// Decide whether a navigation to `path` proceeds.
    ///
    /// Public routes are allowed whether or not a token is present, and a
    /// present token is not validated there: a signed-in visitor may still
    /// open the sign-in page.
    pub fn evaluate(&self, path: &str, token: Option<&str>, now: i64) -> GuardDecision {
        if Self::is_public(path) {
            return GuardDecision::Allow;
        }

        match self.authorize(path, token, now) {
            Ok(_) => GuardDecision::Allow,
            Err(reason) => reason.into(),
        }
    }
}

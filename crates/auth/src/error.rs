//! Authentication errors

use thiserror::Error;

/// Path the guard sends signed-out visitors to
pub const SIGN_IN_PATH: &str = "/signin";

/// Path the guard sends under-privileged visitors to
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No bearer token present")]
    MissingToken,

    #[error("Malformed token: {0}")]
    Decode(String),

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: i64 },

    #[error("Role does not grant access to {path}")]
    Unauthorized { path: String },
}

impl AuthError {
    /// Where a page request failing with this error is sent.
    ///
    /// None of these are rendered as error pages.
    pub fn redirect_path(&self) -> &'static str {
        match self {
            AuthError::MissingToken | AuthError::Decode(_) | AuthError::Expired { .. } => {
                SIGN_IN_PATH
            }
            AuthError::Unauthorized { .. } => UNAUTHORIZED_PATH,
        }
    }

    /// Errors that mean "there is no usable session"
    pub fn is_session_invalid(&self) -> bool {
        !matches!(self, AuthError::Unauthorized { .. })
    }
}

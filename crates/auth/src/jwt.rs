//! Bearer token codec
//!
//! Tokens are HS256 JWTs whose payload is the flat [`IdentityClaims`] shape.
//! The signature is always verified; expiry is left to [`TokenCodec::decode_unexpired`]
//! so callers can tell a stale token apart from a forged one.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::claims::IdentityClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Payload written by [`TokenCodec::encode`]: the claims plus the configured
/// issuer and audience so that tokens minted here pass our own validation.
#[derive(Serialize)]
struct SignedPayload<'a> {
    #[serde(flatten)]
    claims: &'a IdentityClaims,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<&'a str>,
}

/// Encodes and verifies bearer tokens with a shared HMAC secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    audience: Option<String>,
}

impl std::fmt::Debug for TokenCodec {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        // `exp` is optional in our payload and checked separately
        validation.validate_exp = false;

        // A configured issuer or audience must also be present in the token
        let mut required = Vec::new();

        if let Some(aud) = &config.audience {
            validation.set_audience(&[aud]);
            required.push("aud");
        } else {
            validation.validate_aud = false;
        }

        if let Some(iss) = &config.issuer {
            validation.set_issuer(&[iss]);
            required.push("iss");
        }

        validation.set_required_spec_claims(&required);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Verify the token signature and decode its claim set.
    ///
    /// Fails with [`AuthError::Decode`] for anything that is not a correctly
    /// signed token carrying a well-formed claim set with at least one role.
    pub fn decode(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let token_data =
            decode::<IdentityClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Token decode failed");
                AuthError::Decode(e.to_string())
            })?;

        let claims = token_data.claims;
        if claims.role.is_empty() {
            tracing::debug!(user_id = %claims.id, "Token carries no role");
            return Err(AuthError::Decode("token carries no role".to_string()));
        }

        Ok(claims)
    }

    /// Decode and reject tokens whose expiry has passed at `now`.
    pub fn decode_unexpired(&self, token: &str, now: i64) -> Result<IdentityClaims, AuthError> {
        let claims = self.decode(token)?;

        if let Some(exp) = claims.exp.filter(|_| claims.is_expired(now)) {
            tracing::debug!(user_id = %claims.id, exp, now, "Token expired");
            return Err(AuthError::Expired { expired_at: exp });
        }

        Ok(claims)
    }

    /// Sign a claim set into a bearer token.
    pub fn encode(&self, claims: &IdentityClaims) -> Result<String, AuthError> {
        let payload = SignedPayload {
            claims,
            iss: self.issuer.as_deref(),
            aud: self.audience.as_deref(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Token encode failed");
            AuthError::Decode(e.to_string())
        })
    }
}

/// Returns true iff `claims` carries an expiry that is not after `now`.
///
/// A claim set without `exp` never expires.
pub fn is_expired(claims: &IdentityClaims, now: i64) -> bool {
    claims.is_expired(now)
}

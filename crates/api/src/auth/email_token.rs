//! Signed, expiring email verification tokens.
//!
//! Verification links embed an HS256-signed JWT whose subject is the email
//! address being verified. Expiry is enforced at validation time, so a stale
//! link fails closed without any server-side token storage.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every verification token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the email address being verified.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for verification-token generation and validation.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

/// Default verification-token expiry in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `SECRET_KEY`               | **yes**  | --      |
    /// | `EMAIL_TOKEN_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `SECRET_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SECRET_KEY").expect("SECRET_KEY must be set in the environment");
        assert!(!secret.is_empty(), "SECRET_KEY must not be empty");

        let expiry_hours: i64 = std::env::var("EMAIL_TOKEN_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("EMAIL_TOKEN_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Why a verification token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum VerifyTokenError {
    /// The token was valid once but its expiry has passed.
    #[error("Verification token has expired")]
    Expired,
    /// The token is malformed or its signature does not match.
    #[error("Verification token is invalid")]
    Invalid,
}

/// Generate an HS256 verification token for the given email address.
pub fn generate_verification_token(
    email: &str,
    config: &TokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_hours * 3600;

    let claims = Claims {
        sub: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a verification token, returning the embedded email address.
///
/// Expiry is reported separately from every other failure so callers can
/// answer a stale link differently from a forged one.
pub fn verify_verification_token(
    token: &str,
    config: &TokenConfig,
) -> Result<String, VerifyTokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => VerifyTokenError::Expired,
        _ => VerifyTokenError::Invalid,
    })?;
    Ok(token_data.claims.sub)
}

//! Authentication Module
//!
//! Bearer-token (JWT) validation for the Slate API. Token issuance lives in
//! the surrounding identity provider; this module only validates tokens and
//! extracts the acting user. A helper for minting tokens is provided for
//! tests and local development.

use crate::error::{ApiError, ApiResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use slate_core::UserId;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// CLOCK ABSTRACTION (FOR DETERMINISTIC TESTS)
// ============================================================================

/// Clock abstraction for JWT time validation. Injected so tests can pin
/// time; `exp`/`iat` checks run against this clock, not `jsonwebtoken`'s.
pub trait JwtClock: Send + Sync {
    /// Get current time as Unix epoch seconds.
    fn now_epoch_secs(&self) -> i64;
}

/// Production clock using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl JwtClock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl JwtClock for FixedClock {
    fn now_epoch_secs(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// JWT SECRET (TYPE-SAFE)
// ============================================================================

/// Type-safe JWT secret that prevents accidental logging.
#[derive(Clone)]
pub struct JwtSecret(SecretString);

impl JwtSecret {
    /// Create a new JWT secret. Rejects empty secrets.
    pub fn new(secret: String) -> ApiResult<Self> {
        if secret.is_empty() {
            return Err(ApiError::internal_error("JWT secret must not be empty"));
        }
        Ok(Self(SecretString::new(secret.into())))
    }

    /// Expose the secret value (use sparingly, only for cryptographic operations).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Get the length of the secret without exposing it.
    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    /// Check if the secret is empty without exposing it.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtSecret([REDACTED, {} chars])", self.len())
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT secret key for verification
    pub jwt_secret: JwtSecret,

    /// JWT algorithm (default: HS256)
    pub jwt_algorithm: Algorithm,

    /// Token lifetime used by the dev/test token helper, in seconds
    pub jwt_expiration_secs: i64,

    /// Clock skew tolerance in seconds (default: 60)
    pub jwt_clock_skew_secs: i64,

    /// Clock for JWT time validation (injected for testing)
    pub clock: Arc<dyn JwtClock>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .field("jwt_clock_skew_secs", &self.jwt_clock_skew_secs)
            .finish()
    }
}

impl AuthConfig {
    /// Create AuthConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SLATE_JWT_SECRET`: signing secret (falls back to an insecure dev default)
    /// - `SLATE_JWT_EXPIRATION_SECS`: helper-token lifetime (default: 3600)
    /// - `SLATE_JWT_CLOCK_SKEW_SECS`: skew tolerance (default: 60)
    pub fn from_env() -> ApiResult<Self> {
        let secret = std::env::var("SLATE_JWT_SECRET")
            .unwrap_or_else(|_| "INSECURE_DEFAULT_SECRET_CHANGE_IN_PRODUCTION".to_string());

        let jwt_expiration_secs = std::env::var("SLATE_JWT_EXPIRATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let jwt_clock_skew_secs = std::env::var("SLATE_JWT_CLOCK_SKEW_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            jwt_secret: JwtSecret::new(secret)?,
            jwt_algorithm: Algorithm::HS256,
            jwt_expiration_secs,
            jwt_clock_skew_secs,
            clock: Arc::new(SystemClock),
        })
    }

    /// Build a config with an explicit secret and clock (used by tests).
    pub fn with_secret_and_clock(secret: &str, clock: Arc<dyn JwtClock>) -> ApiResult<Self> {
        Ok(Self {
            jwt_secret: JwtSecret::new(secret.to_string())?,
            jwt_algorithm: Algorithm::HS256,
            jwt_expiration_secs: 3600,
            jwt_clock_skew_secs: 60,
            clock,
        })
    }
}

// ============================================================================
// CLAIMS AND CONTEXT
// ============================================================================

/// JWT claims carried by Slate bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the acting user's id
    pub sub: Uuid,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Expiration, epoch seconds
    pub exp: i64,
}

/// Authenticated request context, injected into request extensions by the
/// auth middleware. The `user_id` drives every ownership decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
}

// ============================================================================
// TOKEN VALIDATION
// ============================================================================

/// Validate an `Authorization` header value and produce an [`AuthContext`].
///
/// Signature verification is delegated to `jsonwebtoken`; `exp` is checked
/// against the injected clock with skew tolerance.
pub fn authenticate(config: &AuthConfig, auth_header: Option<&str>) -> ApiResult<AuthContext> {
    let header = auth_header.ok_or_else(|| {
        ApiError::unauthorized("Authentication required: provide Authorization header")
    })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::invalid_token("Authorization header must use Bearer scheme")
    })?;

    let claims = validate_jwt_token(config, token)?;
    Ok(AuthContext {
        user_id: claims.sub,
    })
}

/// Decode and validate a raw JWT, returning its claims.
pub fn validate_jwt_token(config: &AuthConfig, token: &str) -> ApiResult<Claims> {
    // Time validation is done manually against the injected clock below.
    let mut validation = Validation::new(config.jwt_algorithm);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let key = DecodingKey::from_secret(config.jwt_secret.expose().as_bytes());
    let data = decode::<Claims>(token, &key, &validation)
        .map_err(|e| ApiError::invalid_token(format!("Token validation failed: {}", e)))?;

    let now = config.clock.now_epoch_secs();
    if data.claims.exp + config.jwt_clock_skew_secs < now {
        return Err(ApiError::token_expired());
    }
    if data.claims.iat - config.jwt_clock_skew_secs > now {
        return Err(ApiError::invalid_token("Token issued in the future"));
    }

    Ok(data.claims)
}

/// Mint a token for `user_id`. Tests and local development only; production
/// tokens come from the external identity provider.
pub fn generate_jwt_token(config: &AuthConfig, user_id: UserId) -> ApiResult<String> {
    let now = config.clock.now_epoch_secs();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + config.jwt_expiration_secs,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.expose().as_bytes());
    encode(&Header::new(config.jwt_algorithm), &claims, &key)
        .map_err(|e| ApiError::internal_error(format!("Failed to encode token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use slate_core::new_entity_id;

    /// 2024-01-01 00:00:00 UTC
    const T0: i64 = 1_704_067_200;

    fn test_config(clock_at: i64) -> AuthConfig {
        AuthConfig::with_secret_and_clock("test-secret", Arc::new(FixedClock(clock_at)))
            .expect("auth config")
    }

    #[test]
    fn round_trip_valid_token() {
        let config = test_config(T0);
        let user = new_entity_id();
        let token = generate_jwt_token(&config, user).unwrap();

        let ctx = authenticate(&config, Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(ctx.user_id, user);
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let config = test_config(T0);
        let err = authenticate(&config, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let config = test_config(T0);
        let err = authenticate(&config, Some("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }

    #[test]
    fn expired_token_rejected() {
        let minting = test_config(T0);
        let user = new_entity_id();
        let token = generate_jwt_token(&minting, user).unwrap();

        // Two hours later the one-hour token is past expiry plus skew.
        let later = test_config(T0 + 7200);
        let err = authenticate(&later, Some(&format!("Bearer {}", token))).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn skew_tolerance_accepts_just_expired() {
        let minting = test_config(T0);
        let token = generate_jwt_token(&minting, new_entity_id()).unwrap();

        // 30s past expiry is within the 60s skew window.
        let slightly_later = test_config(T0 + 3600 + 30);
        assert!(authenticate(&slightly_later, Some(&format!("Bearer {}", token))).is_ok());
    }

    #[test]
    fn wrong_secret_rejected() {
        let minting = test_config(T0);
        let token = generate_jwt_token(&minting, new_entity_id()).unwrap();

        let other =
            AuthConfig::with_secret_and_clock("other-secret", Arc::new(FixedClock(T0))).unwrap();
        let err = authenticate(&other, Some(&format!("Bearer {}", token))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToken);
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(JwtSecret::new(String::new()).is_err());
    }

    #[test]
    fn debug_never_leaks_secret() {
        let config = test_config(T0);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("test-secret"));
        assert!(debug.contains("REDACTED"));
    }
}

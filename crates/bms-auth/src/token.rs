//! # Token Codec — HS256 Session Tokens
//!
//! Encodes and decodes the signed JWTs that carry a session. A token is
//! self-contained: it binds the subject (`sub`), the session identifier
//! (`jti`) and the expiry instant (`exp`) under an HMAC-SHA256 signature,
//! so validation never needs a database round trip to learn who the
//! caller is or when the grant lapses.
//!
//! ## Security Invariant
//!
//! Signature verification happens before any claim is read. A token that
//! fails verification is indistinguishable from a malformed one; both
//! surface as [`AuthError::InvalidCredentials`] with no further detail.
//!
//! Expiry is deliberately **not** checked here. The library's built-in
//! `exp` check reads the process wall clock with leeway; the session
//! authority instead compares `exp` against its injected clock, second
//! for second.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use bms_core::AuthError;

/// Configuration for the session authority.
///
/// Custom `Debug` redacts the signing secret to prevent credential
/// leakage in logs.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC signing secret shared by encode and decode.
    pub secret: String,
    /// Session lifetime in hours.
    pub ttl_hours: i64,
}

impl SessionConfig {
    /// Create a configuration with the standard 24-hour session lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: 24,
        }
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier the session was issued for.
    pub sub: String,
    /// Session identifier, for revocation lookup.
    pub jti: String,
    /// Issue instant, Unix epoch seconds.
    pub iat: i64,
    /// Expiry instant, Unix epoch seconds.
    pub exp: i64,
}

/// Stateless encoder/decoder for session tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the injected clock by the caller,
        // not against the process wall clock with leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Sign and serialize the claims into a compact JWT.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Codec(e.to_string()))
    }

    /// Verify the signature and deserialize the claims.
    ///
    /// Malformed tokens, tokens signed under a different secret, and
    /// tokens missing required claims all collapse into
    /// [`AuthError::InvalidCredentials`].
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

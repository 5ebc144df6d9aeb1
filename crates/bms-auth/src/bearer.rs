//! # Bearer Scheme — Authorization Header Framing
//!
//! On the wire a session token travels as `Bearer <token>`. The prefix
//! match is case-sensitive and expects exactly one space: `bearer x`,
//! `BEARER x` and a bare token are all rejected before any decoding is
//! attempted.

use bms_core::AuthError;

/// The authorization scheme prefix, including its trailing space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Frame a raw token for the wire.
pub fn bearer_header(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

/// Strip the scheme prefix from an authorization header value.
///
/// The remainder is returned verbatim; no trimming, no decoding.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when the value does not
/// start with the exact `Bearer ` prefix.
pub fn strip_bearer(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidCredentials)
}

//! # Session Authority — Issue, Validate, Invalidate
//!
//! The session authority mints 24-hour bearer sessions and answers the
//! only two questions the rest of the system asks about them: *who is
//! this token for*, and *is it still good*.
//!
//! ## Design
//!
//! Tokens are self-contained (subject and expiry live in the signed
//! claims), and every issued session is additionally persisted through
//! [`SessionStore`]. The persisted row exists for revocation and audit:
//! validation consults it only to learn whether the session was
//! explicitly invalidated. A token whose row has vanished still
//! validates until its expiry instant passes.
//!
//! ## Security Invariant
//!
//! A session is valid **strictly before** its expiry instant. At the
//! instant itself (`now == expires_at`) it is already expired; there is
//! no leeway in either direction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bms_core::{AuthError, Clock, SessionId, Timestamp};

use crate::bearer::bearer_header;
use crate::token::{Claims, SessionConfig, TokenCodec};

/// Persisted state of one issued session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier, mirrored in the token's `jti` claim.
    pub session_id: SessionId,
    /// Subject the session was issued for.
    pub subject_id: String,
    /// Issue instant.
    pub issued_at: Timestamp,
    /// Expiry instant. The session is expired once this is reached.
    pub expires_at: Timestamp,
    /// Cleared on invalidation. Never flips back to `true`.
    pub active: bool,
}

impl SessionRecord {
    /// Whether the expiry instant has been reached.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Whether the session is active and unexpired.
    pub fn is_valid(&self, now: Timestamp) -> bool {
        self.active && !self.is_expired(now)
    }

    /// Mark the session invalid. Idempotent.
    pub fn invalidate(&mut self) {
        self.active = false;
    }
}

/// Persistence seam for session records.
pub trait SessionStore: Send + Sync {
    /// Insert or replace the record for its session identifier.
    fn save(&self, record: SessionRecord);

    /// Look up a record by session identifier.
    fn find(&self, session_id: &SessionId) -> Option<SessionRecord>;

    /// All records for a subject that are valid at `now`.
    fn active_for_subject(&self, subject_id: &str, now: Timestamp) -> Vec<SessionRecord>;

    /// Deactivate every record whose expiry has passed at `now`.
    /// Returns the number of records deactivated.
    fn deactivate_expired(&self, now: Timestamp) -> usize;
}

/// A freshly minted session: the raw token, its wire framing, and the
/// persisted record.
///
/// Custom `Debug` redacts the token; it is the credential.
#[derive(Clone)]
pub struct IssuedSession {
    /// The signed compact JWT.
    pub token: String,
    /// The token framed as an authorization header value.
    pub bearer_header: String,
    /// The record persisted at issue time.
    pub record: SessionRecord,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"[REDACTED]")
            .field("bearer_header", &"[REDACTED]")
            .field("record", &self.record)
            .finish()
    }
}

/// Issues, validates and invalidates bearer sessions.
pub struct SessionAuthority<S: SessionStore, C: Clock> {
    store: S,
    codec: TokenCodec,
    ttl_hours: i64,
    clock: C,
}

impl<S: SessionStore, C: Clock> SessionAuthority<S, C> {
    /// Build an authority over the given store and clock.
    pub fn new(store: S, config: &SessionConfig, clock: C) -> Self {
        Self {
            store,
            codec: TokenCodec::new(config),
            ttl_hours: config.ttl_hours,
            clock,
        }
    }

    /// Issue a new session for a subject.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidSubject`] when the subject identifier is
    ///   empty or blank.
    /// - [`AuthError::Codec`] when signing fails or the expiry instant
    ///   overflows the calendar.
    pub fn issue(&self, subject_id: &str) -> Result<IssuedSession, AuthError> {
        if subject_id.trim().is_empty() {
            return Err(AuthError::InvalidSubject);
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_hours(self.ttl_hours)
            .ok_or_else(|| AuthError::Codec("session expiry overflows the calendar".to_string()))?;

        let session_id = SessionId::new();
        let claims = Claims {
            sub: subject_id.to_string(),
            jti: session_id.as_uuid().to_string(),
            iat: issued_at.epoch_secs(),
            exp: expires_at.epoch_secs(),
        };
        let token = self.codec.encode(&claims)?;

        let record = SessionRecord {
            session_id: session_id.clone(),
            subject_id: subject_id.to_string(),
            issued_at,
            expires_at,
            active: true,
        };
        self.store.save(record.clone());

        tracing::info!(
            session_id = %session_id,
            subject_id = %subject_id,
            expires_at = %expires_at,
            "session issued"
        );

        Ok(IssuedSession {
            bearer_header: bearer_header(&token),
            token,
            record,
        })
    }

    /// Validate a raw token and return the subject it was issued for.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] for malformed or tampered
    ///   tokens, including a `jti` that is not one of ours.
    /// - [`AuthError::ExpiredToken`] once the expiry instant is reached.
    /// - [`AuthError::Revoked`] when the session was invalidated.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.codec.decode(token)?;

        if self.clock.now().epoch_secs() >= claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        let session_id = parse_jti(&claims.jti)?;
        if let Some(record) = self.store.find(&session_id) {
            if !record.active {
                return Err(AuthError::Revoked);
            }
        }

        Ok(claims.sub)
    }

    /// Invalidate the session behind a raw token.
    ///
    /// A no-op for tokens that do not verify and for sessions that are
    /// already invalid; invalidating twice is indistinguishable from
    /// invalidating once. When the persisted row is missing, a tombstone
    /// row is written so later validations see the revocation.
    pub fn invalidate(&self, token: &str) {
        let Ok(claims) = self.codec.decode(token) else {
            tracing::debug!("invalidate ignored an unverifiable token");
            return;
        };
        let Ok(session_id) = parse_jti(&claims.jti) else {
            return;
        };

        let mut record = self.store.find(&session_id).unwrap_or_else(|| SessionRecord {
            session_id: session_id.clone(),
            subject_id: claims.sub,
            issued_at: Timestamp::from_epoch_secs(claims.iat).unwrap_or(Timestamp::UNIX_EPOCH),
            expires_at: Timestamp::from_epoch_secs(claims.exp).unwrap_or(Timestamp::UNIX_EPOCH),
            active: true,
        });
        record.invalidate();
        self.store.save(record);

        tracing::info!(session_id = %session_id, "session invalidated");
    }

    /// All sessions for a subject that are valid right now.
    pub fn active_sessions(&self, subject_id: &str) -> Vec<SessionRecord> {
        self.store.active_for_subject(subject_id, self.clock.now())
    }

    /// Deactivate every persisted session whose expiry has passed.
    /// Returns the number swept.
    pub fn sweep_expired(&self) -> usize {
        let swept = self.store.deactivate_expired(self.clock.now());
        if swept > 0 {
            tracing::info!(swept, "expired sessions deactivated");
        }
        swept
    }
}

/// Parse a `jti` claim back into a session identifier.
fn parse_jti(jti: &str) -> Result<SessionId, AuthError> {
    Uuid::parse_str(jti)
        .map(SessionId)
        .map_err(|_| AuthError::InvalidCredentials)
}

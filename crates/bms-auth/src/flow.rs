//! # Login Flow — Credentials In, Bearer Session Out
//!
//! Glues credential lookup to the session authority: `login` turns a
//! login ID and password into an issued session, `authenticate` turns an
//! authorization header back into a subject, `logout` revokes.
//!
//! ## Security Invariant
//!
//! An unknown login ID and a wrong password both surface as
//! [`AuthError::InvalidCredentials`]. A caller cannot learn from the
//! error which half of the pair was wrong, so login cannot be used to
//! enumerate registered login IDs.
//!
//! ## Credential Verification Seam
//!
//! Secrets are compared through [`CredentialVerifier`]. The shipped
//! [`PlainTextVerifier`] is literal string equality over secrets stored
//! in the clear; a hashing verifier slots in at the same seam without
//! touching the flow.

use bms_core::{AuthError, Clock};

use crate::bearer::strip_bearer;
use crate::session::{IssuedSession, SessionAuthority, SessionStore};

/// A login-capable identity as the directory stores it.
///
/// Custom `Debug` redacts the stored secret.
#[derive(Clone)]
pub struct Identity {
    /// Opaque subject identifier bound into issued tokens.
    pub subject_id: String,
    /// Login ID the identity authenticates under.
    pub login_id: String,
    /// Stored secret, in whatever form the verifier expects.
    pub secret: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("subject_id", &self.subject_id)
            .field("login_id", &self.login_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Lookup seam for login-capable identities.
pub trait IdentityStore: Send + Sync {
    /// Find the identity registered under a login ID.
    fn find_by_login_id(&self, login_id: &str) -> Option<Identity>;
}

/// Compares a supplied secret against the stored one.
pub trait CredentialVerifier: Send + Sync {
    /// Whether `supplied` matches `stored`.
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Literal string equality over plaintext stored secrets.
///
/// Case-sensitive, no hashing, no timing hardening. Exists so the
/// verification seam has a working default; production deployments
/// replace it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied == stored
    }
}

/// The credential login flow over a session authority.
pub struct AuthFlow<I, S, C, V>
where
    I: IdentityStore,
    S: SessionStore,
    C: Clock,
    V: CredentialVerifier,
{
    identities: I,
    authority: SessionAuthority<S, C>,
    verifier: V,
}

impl<I, S, C, V> AuthFlow<I, S, C, V>
where
    I: IdentityStore,
    S: SessionStore,
    C: Clock,
    V: CredentialVerifier,
{
    /// Build a flow over the given identity store, authority and verifier.
    pub fn new(identities: I, authority: SessionAuthority<S, C>, verifier: V) -> Self {
        Self {
            identities,
            authority,
            verifier,
        }
    }

    /// Authenticate credentials and issue a session.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the login ID is unknown or
    /// the password does not match; the two cases are indistinguishable.
    pub fn login(&self, login_id: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let identity = match self.identities.find_by_login_id(login_id) {
            Some(identity) => identity,
            None => {
                tracing::warn!(login_id = %login_id, "login failed: unknown login ID");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.verifier.verify(password, &identity.secret) {
            tracing::warn!(login_id = %login_id, "login failed: credential mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.authority.issue(&identity.subject_id)?;
        tracing::info!(
            login_id = %login_id,
            session_id = %issued.record.session_id,
            "login succeeded"
        );
        Ok(issued)
    }

    /// Resolve an authorization header to the subject it belongs to.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for a malformed header or token,
    /// [`AuthError::ExpiredToken`] or [`AuthError::Revoked`] for a dead
    /// session.
    pub fn authenticate(&self, authorization: &str) -> Result<String, AuthError> {
        let token = strip_bearer(authorization)?;
        self.authority.validate(token)
    }

    /// Revoke the session behind an authorization header.
    ///
    /// Succeeds for sessions that are already invalid or unknown;
    /// logging out twice is indistinguishable from logging out once.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the header does not carry
    /// the `Bearer ` scheme.
    pub fn logout(&self, authorization: &str) -> Result<(), AuthError> {
        let token = strip_bearer(authorization)?;
        self.authority.invalidate(token);
        Ok(())
    }

    /// The underlying session authority, for registry queries and sweeps.
    pub fn authority(&self) -> &SessionAuthority<S, C> {
        &self.authority
    }
}

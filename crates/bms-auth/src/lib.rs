//! # bms-auth — Session Authority and Login Flow
//!
//! Issues, validates and revokes the 24-hour bearer sessions that gate
//! every customer-facing operation in the BMS Stack.
//!
//! ## Modules
//!
//! - **Token codec** (`token.rs`): HS256-signed JWTs binding subject,
//!   session identifier and expiry. Signature failures and malformed
//!   input are indistinguishable.
//!
//! - **Bearer framing** (`bearer.rs`): the `Bearer <token>` wire form.
//!   Case-sensitive prefix, exactly one space, stripped verbatim.
//!
//! - **Session authority** (`session.rs`): issue / validate / invalidate
//!   over a persisted session registry, with an injected clock deciding
//!   expiry to the second.
//!
//! - **Login flow** (`flow.rs`): credentials in, bearer session out,
//!   with a pluggable credential-verification seam.
//!
//! ## Design
//!
//! Time never comes from the wall clock directly. The authority holds a
//! `bms_core::Clock`, and a session is valid strictly before its expiry
//! instant. The JWT library's own expiry check (wall clock, with leeway)
//! is disabled in favour of that rule.

pub mod bearer;
pub mod flow;
pub mod session;
pub mod token;

// ─── Bearer re-exports ──────────────────────────────────────────────

pub use bearer::{bearer_header, strip_bearer, BEARER_PREFIX};

// ─── Session re-exports ─────────────────────────────────────────────

pub use session::{IssuedSession, SessionAuthority, SessionRecord, SessionStore};

// ─── Token re-exports ───────────────────────────────────────────────

pub use token::{Claims, SessionConfig, TokenCodec};

// ─── Flow re-exports ────────────────────────────────────────────────

pub use flow::{AuthFlow, CredentialVerifier, Identity, IdentityStore, PlainTextVerifier};

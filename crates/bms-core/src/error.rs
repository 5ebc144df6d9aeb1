//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the BMS Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Credential and token failures never disclose which part of the check
//!   failed beyond the variant itself.
//! - Ownership mismatches report `NotFound`, indistinguishable from an
//!   absent record, so a caller cannot probe another customer's loans.
//! - All failures are terminal for the operation that raised them; nothing
//!   in this workspace retries internally.

use thiserror::Error;

/// Top-level error type for the BMS Stack.
#[derive(Error, Debug)]
pub enum BmsError {
    /// Session or credential failure.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Loan lookup or servicing failure.
    #[error("loan error: {0}")]
    Loan(#[from] LoanError),

    /// Customer directory failure.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Timestamp parsing or arithmetic failure.
    #[error("temporal error: {0}")]
    Temporal(String),
}

/// Errors raised by the session authority and login flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A session cannot be issued for an empty subject.
    #[error("cannot issue a session for an empty subject")]
    InvalidSubject,

    /// Login mismatch, or a malformed/tampered bearer token.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token's expiry instant has been reached.
    #[error("token expired")]
    ExpiredToken,

    /// The session behind the token was explicitly invalidated.
    #[error("session revoked")]
    Revoked,

    /// Token encoding/decoding infrastructure failure.
    #[error("token codec failure: {0}")]
    Codec(String),
}

/// Errors raised by the loan engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    /// The loan does not exist, or belongs to a different customer.
    #[error("{loan_id} not found")]
    NotFound {
        /// The requested loan identifier.
        loan_id: String,
    },
}

/// Errors raised by the customer directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A customer with this login ID is already registered.
    #[error("customer with login ID {login_id} already exists")]
    DuplicateLogin {
        /// The conflicting login ID.
        login_id: String,
    },

    /// No customer record under this identifier.
    #[error("{customer_id} not found")]
    NotFound {
        /// The requested customer identifier.
        customer_id: String,
    },
}

//! # bms-core — Foundational Types for the BMS Stack
//!
//! This crate is the bedrock of the BMS Stack. It defines the core
//! type-system primitives that enforce correctness guarantees at compile
//! time. Every other crate in the workspace depends on `bms-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `CustomerId`, `LoanId`,
//!    `SessionId` — all UUID newtypes. No bare strings for identifiers.
//!
//! 2. **UTC-only timestamps behind an injectable clock.** The `Timestamp`
//!    type enforces UTC with Z suffix and seconds precision, and every
//!    service reads time through the `Clock` trait so expiry and maturity
//!    arithmetic is testable to the second.
//!
//! 3. **`Decimal` money.** Amounts, rates and EMIs are `rust_decimal`
//!    values; customer-facing figures are rounded half-up to two places
//!    through `round_money()`.
//!
//! 4. **One error taxonomy.** `AuthError`, `LoanError` and
//!    `DirectoryError` roll up into `BmsError`; variants carry only what
//!    a caller may learn.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bms-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod money;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{AuthError, BmsError, DirectoryError, LoanError};
pub use identity::{CustomerId, LoanId, SessionId};
pub use money::{round_money, Decimal};
pub use temporal::{Clock, FixedClock, SystemClock, Timestamp};

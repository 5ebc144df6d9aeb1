//! # bms-loan — Loan Products and Servicing
//!
//! Everything a loan does in the BMS Stack, from application to closure.
//!
//! ## Modules
//!
//! - **Products** (`product.rs`): the five products, their base rates
//!   and descriptions, and the rate-resolution rule.
//!
//! - **EMI** (`emi.rs`): the reducing-balance installment formula with
//!   its straight-line and degenerate branches, rounded half-up to two
//!   places.
//!
//! - **Applications** (`application.rs`): the loan record and its
//!   lifecycle guards. Status changes are unrestricted; first-entry
//!   dates and the stored EMI are the guarded facts.
//!
//! - **Engine** (`engine.rs`): load-mutate-save servicing over a
//!   [`LoanStore`], with ownership-scoped reads.

pub mod application;
pub mod emi;
pub mod engine;
pub mod product;

// ─── Product re-exports ─────────────────────────────────────────────

pub use product::{catalog, resolve_rate, LoanProduct, LoanType};

// ─── EMI re-exports ─────────────────────────────────────────────────

pub use emi::compute_emi;

// ─── Application re-exports ─────────────────────────────────────────

pub use application::{LoanApplication, LoanRequest, LoanStatus};

// ─── Engine re-exports ──────────────────────────────────────────────

pub use engine::{LoanEngine, LoanStore};

//! # bms-customer — Customer Directory and Accounts
//!
//! Registration, profile upkeep and deposit account records for the
//! BMS Stack.
//!
//! ## Modules
//!
//! - **Customers** (`customer.rs`): the customer record, the
//!   registration shape, and profile updates that can only reach
//!   contact details.
//!
//! - **Accounts** (`account.rs`): the deposit account record opened
//!   alongside every registration.
//!
//! - **Directory** (`directory.rs`): registration with duplicate-login
//!   protection and profile amendment over pluggable stores.

pub mod account;
pub mod customer;
pub mod directory;

// ─── Customer re-exports ────────────────────────────────────────────

pub use customer::{AccountType, Customer, ProfileUpdate, RegistrationRequest};

// ─── Account re-exports ─────────────────────────────────────────────

pub use account::Account;

// ─── Directory re-exports ───────────────────────────────────────────

pub use directory::{AccountStore, CustomerDirectory, CustomerStore};

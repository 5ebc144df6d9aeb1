//! # bms-store — In-Memory Persistence
//!
//! Concrete, thread-safe implementations of the persistence seams the
//! other crates define: sessions, loans, customers and accounts, each a
//! cloneable handle over shared rows.
//!
//! The customer store doubles as the login identity store, so one table
//! backs both the directory and the authentication flow.

pub mod memory;

pub use memory::{MemoryAccountStore, MemoryCustomerStore, MemoryLoanStore, MemorySessionStore};

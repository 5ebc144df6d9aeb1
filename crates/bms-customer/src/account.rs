//! # Deposit Accounts
//!
//! The account record opened alongside a registration. Balance movement
//! is owned elsewhere; this record carries the balance as a fact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bms_core::{CustomerId, Timestamp};

use crate::customer::{AccountType, Customer};

/// One deposit account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account number, unique across the bank.
    pub account_number: String,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Account product.
    pub account_type: AccountType,
    /// Current balance.
    pub balance: Decimal,
    /// Whether the account is open for use.
    pub active: bool,
    /// Record creation instant.
    pub created_at: Timestamp,
    /// Last mutation instant.
    pub updated_at: Timestamp,
}

impl Account {
    /// Open the primary account for a freshly registered customer.
    ///
    /// Starts active with a zero balance.
    pub fn open_for(customer: &Customer, now: Timestamp) -> Self {
        Self {
            account_number: customer.account_number.clone(),
            customer_id: customer.customer_id.clone(),
            account_type: customer.account_type,
            balance: Decimal::ZERO,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

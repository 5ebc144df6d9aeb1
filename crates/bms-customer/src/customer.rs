//! # Customer Records
//!
//! The customer record as the directory stores it, and the two shapes
//! it is built and amended from: a [`RegistrationRequest`] supplies the
//! full record once, a [`ProfileUpdate`] amends contact details later.
//!
//! ## Security Invariant
//!
//! Profile updates can only reach name, email, phone number and address.
//! The login ID, the stored secret, the PAN, the date of birth and the
//! account number are fixed at registration; there is no code path that
//! rewrites them.

use serde::{Deserialize, Serialize};

use bms_core::{CustomerId, Timestamp};

/// Deposit account products a customer can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Standard savings account.
    Savings,
    /// Current account for business banking.
    Current,
    /// Fixed-term deposit.
    FixedDeposit,
    /// Recurring deposit.
    RecurringDeposit,
}

impl AccountType {
    /// Return the string representation of this account type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Savings => "SAVINGS",
            Self::Current => "CURRENT",
            Self::FixedDeposit => "FIXED_DEPOSIT",
            Self::RecurringDeposit => "RECURRING_DEPOSIT",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a new customer supplies at registration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Postal address.
    pub address: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Primary account number.
    pub account_number: String,
    /// Permanent Account Number for tax identification.
    pub pan_number: String,
    /// Date of birth, as supplied.
    pub date_of_birth: String,
    /// Type of the primary account.
    pub account_type: AccountType,
    /// Login ID, unique across the directory.
    pub login_id: String,
    /// Login secret, stored as supplied.
    pub password: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("login_id", &self.login_id)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Contact-detail amendments. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New full name, if changing.
    pub name: Option<String>,
    /// New contact email, if changing.
    pub email: Option<String>,
    /// New phone number, if changing.
    pub phone_number: Option<String>,
    /// New postal address, if changing.
    pub address: Option<String>,
}

/// One registered customer.
///
/// Custom `Debug` redacts the stored secret.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier.
    pub customer_id: CustomerId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Postal address.
    pub address: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Primary account number.
    pub account_number: String,
    /// Permanent Account Number. Fixed at registration.
    pub pan_number: String,
    /// Date of birth. Fixed at registration.
    pub date_of_birth: String,
    /// Type of the primary account.
    pub account_type: AccountType,
    /// Login ID. Fixed at registration.
    pub login_id: String,
    /// Stored login secret. Fixed at registration.
    pub secret: String,
    /// Record creation instant.
    pub created_at: Timestamp,
    /// Last mutation instant.
    pub updated_at: Timestamp,
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("customer_id", &self.customer_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("login_id", &self.login_id)
            .field("secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Customer {
    /// Build a fresh record from a registration request.
    pub fn from_registration(request: RegistrationRequest, now: Timestamp) -> Self {
        Self {
            customer_id: CustomerId::new(),
            name: request.name,
            email: request.email,
            phone_number: request.phone_number,
            address: request.address,
            state: request.state,
            country: request.country,
            account_number: request.account_number,
            pan_number: request.pan_number,
            date_of_birth: request.date_of_birth,
            account_type: request.account_type,
            login_id: request.login_id,
            secret: request.password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile update. Only the supplied fields change.
    pub fn apply_update(&mut self, update: ProfileUpdate, now: Timestamp) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        self.updated_at = now;
    }
}

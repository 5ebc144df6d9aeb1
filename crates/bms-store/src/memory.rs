//! # In-Memory Stores
//!
//! Thread-safe, cloneable implementations of every persistence seam in
//! the workspace. Cloning a store clones a handle; all clones share the
//! same rows, so a directory, a login flow and a test can look at one
//! customer table.
//!
//! All operations are synchronous. The locks are `parking_lot`, which is
//! non-poisonable — a panicking writer does not permanently corrupt the
//! table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use bms_auth::{Identity, IdentityStore, SessionRecord, SessionStore};
use bms_core::{CustomerId, LoanId, SessionId, Timestamp};
use bms_customer::{Account, AccountStore, Customer, CustomerStore};
use bms_loan::{LoanApplication, LoanStore};

// ─── Sessions ───────────────────────────────────────────────────────

/// Session registry backed by a `HashMap` keyed on session identifier.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    rows: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records, active or not.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, record: SessionRecord) {
        self.rows
            .write()
            .insert(*record.session_id.as_uuid(), record);
    }

    fn find(&self, session_id: &SessionId) -> Option<SessionRecord> {
        self.rows.read().get(session_id.as_uuid()).cloned()
    }

    fn active_for_subject(&self, subject_id: &str, now: Timestamp) -> Vec<SessionRecord> {
        self.rows
            .read()
            .values()
            .filter(|r| r.subject_id == subject_id && r.is_valid(now))
            .cloned()
            .collect()
    }

    fn deactivate_expired(&self, now: Timestamp) -> usize {
        let mut rows = self.rows.write();
        let mut swept = 0;
        for record in rows.values_mut() {
            if record.active && record.is_expired(now) {
                record.invalidate();
                swept += 1;
            }
        }
        swept
    }
}

// ─── Loans ──────────────────────────────────────────────────────────

/// Loan book backed by a `HashMap` keyed on loan identifier.
#[derive(Debug, Clone)]
pub struct MemoryLoanStore {
    rows: Arc<RwLock<HashMap<Uuid, LoanApplication>>>,
}

impl MemoryLoanStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryLoanStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanStore for MemoryLoanStore {
    fn save(&self, application: LoanApplication) -> LoanApplication {
        self.rows
            .write()
            .insert(*application.loan_id.as_uuid(), application.clone());
        application
    }

    fn find(&self, loan_id: &LoanId) -> Option<LoanApplication> {
        self.rows.read().get(loan_id.as_uuid()).cloned()
    }

    fn find_by_customer(&self, customer_id: &CustomerId) -> Vec<LoanApplication> {
        let mut loans: Vec<_> = self
            .rows
            .read()
            .values()
            .filter(|a| a.customer_id == *customer_id)
            .cloned()
            .collect();
        // Deterministic order: oldest application first, identifier as
        // the tie-break for applications opened in the same second.
        loans.sort_by_key(|a| (a.application_date, *a.loan_id.as_uuid()));
        loans
    }
}

// ─── Customers ──────────────────────────────────────────────────────

/// Customer table backed by a `HashMap` keyed on customer identifier.
///
/// Also serves as the identity store for login: a customer row projects
/// to an [`Identity`] whose subject is the bare customer UUID.
#[derive(Debug, Clone)]
pub struct MemoryCustomerStore {
    rows: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl MemoryCustomerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for MemoryCustomerStore {
    fn save(&self, customer: Customer) -> Customer {
        self.rows
            .write()
            .insert(*customer.customer_id.as_uuid(), customer.clone());
        customer
    }

    fn find(&self, customer_id: &CustomerId) -> Option<Customer> {
        self.rows.read().get(customer_id.as_uuid()).cloned()
    }

    fn find_by_login_id(&self, login_id: &str) -> Option<Customer> {
        self.rows
            .read()
            .values()
            .find(|c| c.login_id == login_id)
            .cloned()
    }
}

impl IdentityStore for MemoryCustomerStore {
    fn find_by_login_id(&self, login_id: &str) -> Option<Identity> {
        CustomerStore::find_by_login_id(self, login_id).map(|customer| Identity {
            subject_id: customer.customer_id.as_uuid().to_string(),
            login_id: customer.login_id,
            secret: customer.secret,
        })
    }
}

// ─── Accounts ───────────────────────────────────────────────────────

/// Account table backed by a `HashMap` keyed on account number.
#[derive(Debug, Clone)]
pub struct MemoryAccountStore {
    rows: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryAccountStore {
    fn save(&self, account: Account) -> Account {
        self.rows
            .write()
            .insert(account.account_number.clone(), account.clone());
        account
    }

    fn find_by_number(&self, account_number: &str) -> Option<Account> {
        self.rows.read().get(account_number).cloned()
    }

    fn find_by_customer(&self, customer_id: &CustomerId) -> Vec<Account> {
        let mut accounts: Vec<_> = self
            .rows
            .read()
            .values()
            .filter(|a| a.customer_id == *customer_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }
}

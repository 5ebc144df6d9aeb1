//! # Customer Directory — Registration and Profile Upkeep
//!
//! The directory owns customer records and their primary accounts. A
//! registration is one atomic intent: reject on a duplicate login ID,
//! otherwise persist the customer and open the primary account.

use bms_core::{Clock, CustomerId, DirectoryError};

use crate::account::Account;
use crate::customer::{Customer, ProfileUpdate, RegistrationRequest};

/// Persistence seam for customer records.
pub trait CustomerStore: Send + Sync {
    /// Insert or replace the record for its customer identifier.
    /// Returns the stored record.
    fn save(&self, customer: Customer) -> Customer;

    /// Look up a record by customer identifier.
    fn find(&self, customer_id: &CustomerId) -> Option<Customer>;

    /// Look up a record by login ID.
    fn find_by_login_id(&self, login_id: &str) -> Option<Customer>;
}

/// Persistence seam for deposit accounts.
pub trait AccountStore: Send + Sync {
    /// Insert or replace the record for its account number.
    /// Returns the stored record.
    fn save(&self, account: Account) -> Account;

    /// Look up an account by account number.
    fn find_by_number(&self, account_number: &str) -> Option<Account>;

    /// All accounts owned by a customer.
    fn find_by_customer(&self, customer_id: &CustomerId) -> Vec<Account>;
}

/// Registration and profile operations over the customer stores.
pub struct CustomerDirectory<S: CustomerStore, A: AccountStore, C: Clock> {
    customers: S,
    accounts: A,
    clock: C,
}

impl<S: CustomerStore, A: AccountStore, C: Clock> CustomerDirectory<S, A, C> {
    /// Build a directory over the given stores and clock.
    pub fn new(customers: S, accounts: A, clock: C) -> Self {
        Self {
            customers,
            accounts,
            clock,
        }
    }

    /// Register a new customer and open their primary account.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::DuplicateLogin`] when the login ID is already
    /// registered.
    pub fn register(&self, request: RegistrationRequest) -> Result<Customer, DirectoryError> {
        if self.customers.find_by_login_id(&request.login_id).is_some() {
            tracing::warn!(login_id = %request.login_id, "registration rejected: login ID taken");
            return Err(DirectoryError::DuplicateLogin {
                login_id: request.login_id,
            });
        }

        let now = self.clock.now();
        let customer = self.customers.save(Customer::from_registration(request, now));
        self.accounts.save(Account::open_for(&customer, now));

        tracing::info!(
            customer_id = %customer.customer_id,
            login_id = %customer.login_id,
            account_number = %customer.account_number,
            "customer registered"
        );
        Ok(customer)
    }

    /// Amend a customer's contact details.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] when no customer exists under
    /// `customer_id`.
    pub fn update_profile(
        &self,
        customer_id: &CustomerId,
        update: ProfileUpdate,
    ) -> Result<Customer, DirectoryError> {
        let mut customer =
            self.customers
                .find(customer_id)
                .ok_or_else(|| DirectoryError::NotFound {
                    customer_id: customer_id.to_string(),
                })?;

        customer.apply_update(update, self.clock.now());
        Ok(self.customers.save(customer))
    }

    /// Look up a customer record.
    pub fn find_customer(&self, customer_id: &CustomerId) -> Option<Customer> {
        self.customers.find(customer_id)
    }

    /// All accounts owned by a customer.
    pub fn accounts_for_customer(&self, customer_id: &CustomerId) -> Vec<Account> {
        self.accounts.find_by_customer(customer_id)
    }
}

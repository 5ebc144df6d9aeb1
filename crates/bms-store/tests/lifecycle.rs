//! # Full-Stack Lifecycle Tests
//!
//! These tests wire the real stores into the directory, the login flow
//! and the loan engine, then walk a customer through the same journeys
//! the back office runs: register, log in, borrow, get approved and
//! disbursed, reschedule, log out.
//!
//! Time is a pinned clock shared by every component, so session expiry
//! and maturity arithmetic are asserted to the second.

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use bms_auth::{AuthFlow, PlainTextVerifier, SessionAuthority, SessionConfig};
use bms_core::{AuthError, Clock, CustomerId, FixedClock, LoanError, Timestamp};
use bms_customer::{AccountType, CustomerDirectory, ProfileUpdate, RegistrationRequest};
use bms_loan::{compute_emi, LoanEngine, LoanRequest, LoanStatus, LoanType};
use bms_store::{
    MemoryAccountStore, MemoryCustomerStore, MemoryLoanStore, MemorySessionStore,
};

struct Bank {
    clock: Arc<FixedClock>,
    directory: CustomerDirectory<MemoryCustomerStore, MemoryAccountStore, Arc<FixedClock>>,
    auth: AuthFlow<MemoryCustomerStore, MemorySessionStore, Arc<FixedClock>, PlainTextVerifier>,
    loans: LoanEngine<MemoryLoanStore, Arc<FixedClock>>,
}

/// Assemble a bank over shared in-memory stores and a pinned clock.
fn bank() -> Bank {
    let clock = Arc::new(FixedClock::at(
        Timestamp::parse("2026-01-15T09:00:00Z").unwrap(),
    ));
    let customers = MemoryCustomerStore::new();

    let directory = CustomerDirectory::new(
        customers.clone(),
        MemoryAccountStore::new(),
        Arc::clone(&clock),
    );
    let authority = SessionAuthority::new(
        MemorySessionStore::new(),
        &SessionConfig::new("integration-secret"),
        Arc::clone(&clock),
    );
    let auth = AuthFlow::new(customers, authority, PlainTextVerifier);
    let loans = LoanEngine::new(MemoryLoanStore::new(), Arc::clone(&clock));

    Bank {
        clock,
        directory,
        auth,
        loans,
    }
}

fn registration(login_id: &str, account_number: &str) -> RegistrationRequest {
    RegistrationRequest {
        name: "Asha Kulkarni".to_string(),
        email: "asha@example.com".to_string(),
        phone_number: "9876543210".to_string(),
        address: Some("12 Lake Road".to_string()),
        state: Some("Maharashtra".to_string()),
        country: Some("India".to_string()),
        account_number: account_number.to_string(),
        pan_number: "ABCDE1234F".to_string(),
        date_of_birth: "1991-04-23".to_string(),
        account_type: AccountType::Savings,
        login_id: login_id.to_string(),
        password: "opensesame".to_string(),
    }
}

/// Resolve the subject string a session carries back into a customer ID.
fn subject_to_customer(subject: &str) -> CustomerId {
    CustomerId(Uuid::parse_str(subject).expect("subject is a customer UUID"))
}

#[test]
fn customer_journey_from_registration_to_closure() {
    let bank = bank();

    // Register and log in.
    let customer = bank
        .directory
        .register(registration("asha.k", "ACC-1001"))
        .unwrap();
    let issued = bank.auth.login("asha.k", "opensesame").unwrap();

    let subject = bank.auth.authenticate(&issued.bearer_header).unwrap();
    assert_eq!(subject_to_customer(&subject), customer.customer_id);

    // Apply for a home loan on the base rate.
    let loan = bank.loans.apply(
        customer.customer_id.clone(),
        LoanRequest {
            loan_type: LoanType::Home,
            amount: dec!(100000),
            requested_rate: None,
            tenure_months: Some(12),
            purpose: Some("first flat".to_string()),
        },
    );
    assert_eq!(loan.status, LoanStatus::Pending);
    assert_eq!(loan.offered_interest_rate, dec!(9.0));
    assert_eq!(loan.monthly_emi, compute_emi(dec!(100000), dec!(9.0), 12));

    // Next morning: approved.
    bank.clock.advance_hours(24);
    let approved = bank
        .loans
        .transition(&loan.loan_id, LoanStatus::Approved)
        .unwrap();
    assert_eq!(approved.approval_date, Some(bank.clock.now()));

    // A week later: disbursed.
    bank.clock.advance_hours(7 * 24);
    let disbursed = bank
        .loans
        .transition(&loan.loan_id, LoanStatus::Disbursed)
        .unwrap();
    let disbursed_at = disbursed.disbursement_date.unwrap();
    assert_eq!(disbursed_at, bank.clock.now());
    assert_eq!(disbursed.outstanding_amount, Some(dec!(100000)));

    // Reschedule twice; the second change defines the maturity.
    let first = bank.loans.change_tenure(&loan.loan_id, 24).unwrap();
    assert_eq!(first.maturity_date, disbursed_at.checked_add_months(24));

    let second = bank.loans.change_tenure(&loan.loan_id, 6).unwrap();
    assert_eq!(second.maturity_date, disbursed_at.checked_add_months(6));

    // The stored EMI still reflects the original 12-month terms until
    // refreshed.
    assert_eq!(second.monthly_emi, loan.monthly_emi);
    let refreshed = bank.loans.refresh_emi(&loan.loan_id).unwrap();
    assert_eq!(
        refreshed.monthly_emi,
        compute_emi(dec!(100000), dec!(9.0), 6)
    );

    // Close the loan, then log out.
    let closed = bank
        .loans
        .transition(&loan.loan_id, LoanStatus::Closed)
        .unwrap();
    assert_eq!(closed.status, LoanStatus::Closed);
    assert_eq!(closed.disbursement_date, Some(disbursed_at));

    bank.auth.logout(&issued.bearer_header).unwrap();
    assert_eq!(
        bank.auth.authenticate(&issued.bearer_header).unwrap_err(),
        AuthError::Revoked
    );
    // Logging out again changes nothing.
    bank.auth.logout(&issued.bearer_header).unwrap();
}

#[test]
fn sessions_expire_on_schedule() {
    let bank = bank();
    bank.directory
        .register(registration("asha.k", "ACC-1001"))
        .unwrap();
    let issued = bank.auth.login("asha.k", "opensesame").unwrap();

    bank.clock.advance_secs(24 * 3600 - 1);
    assert!(bank.auth.authenticate(&issued.bearer_header).is_ok());

    bank.clock.advance_secs(1);
    assert_eq!(
        bank.auth.authenticate(&issued.bearer_header).unwrap_err(),
        AuthError::ExpiredToken
    );

    // A fresh login issues a fresh 24-hour session.
    let renewed = bank.auth.login("asha.k", "opensesame").unwrap();
    assert!(bank.auth.authenticate(&renewed.bearer_header).is_ok());
}

#[test]
fn loans_stay_invisible_across_customers() {
    let bank = bank();
    let asha = bank
        .directory
        .register(registration("asha.k", "ACC-1001"))
        .unwrap();
    let ravi = bank
        .directory
        .register(registration("ravi.m", "ACC-2002"))
        .unwrap();

    let loan = bank.loans.apply(
        asha.customer_id.clone(),
        LoanRequest {
            loan_type: LoanType::Gold,
            amount: dec!(50000),
            requested_rate: Some(dec!(11.0)),
            tenure_months: Some(12),
            purpose: None,
        },
    );

    assert!(bank
        .loans
        .get_for_customer(&asha.customer_id, &loan.loan_id)
        .is_ok());
    assert!(matches!(
        bank.loans
            .get_for_customer(&ravi.customer_id, &loan.loan_id)
            .unwrap_err(),
        LoanError::NotFound { .. }
    ));

    assert_eq!(bank.loans.loans_for_customer(&asha.customer_id).len(), 1);
    assert!(bank.loans.loans_for_customer(&ravi.customer_id).is_empty());
}

#[test]
fn profile_updates_do_not_disturb_credentials() {
    let bank = bank();
    let customer = bank
        .directory
        .register(registration("asha.k", "ACC-1001"))
        .unwrap();

    bank.directory
        .update_profile(
            &customer.customer_id,
            ProfileUpdate {
                email: Some("asha.k@example.com".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();

    // Login still works with the original credentials.
    let issued = bank.auth.login("asha.k", "opensesame").unwrap();
    assert_eq!(
        subject_to_customer(&bank.auth.authenticate(&issued.bearer_header).unwrap()),
        customer.customer_id
    );
}

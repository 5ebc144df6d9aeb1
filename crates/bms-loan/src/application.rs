//! # Loan Applications — Record and Lifecycle
//!
//! A [`LoanApplication`] is the single record a loan lives in from
//! application to closure. Status changes are unrestricted: the back
//! office corrects mistakes by moving a loan to whatever status is
//! right, and the record's guards make the side effects of a revisit
//! harmless.
//!
//! ## Lifecycle Invariants
//!
//! - `approval_date` is set the first time the loan enters `Approved`
//!   and never overwritten.
//! - `disbursement_date` and `outstanding_amount` are set together the
//!   first time the loan enters `Disbursed` and never overwritten.
//! - `maturity_date` is recomputed from the disbursement date on **every**
//!   tenure change after disbursement; the latest change wins.
//! - `monthly_emi` is a stored figure, not a derived one. Changing the
//!   tenure does not resync it; callers ask for a recompute explicitly.
//! - Every mutation stamps `updated_at`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bms_core::{CustomerId, LoanId, Timestamp};

use crate::emi::compute_emi;
use crate::product::{resolve_rate, LoanType};

/// Lifecycle states of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Application received, not yet decided.
    Pending,
    /// Approved for disbursement.
    Approved,
    /// Declined.
    Rejected,
    /// Funds released to the customer.
    Disbursed,
    /// Fully repaid or otherwise settled.
    Closed,
}

impl LoanStatus {
    /// Return the string representation of this status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Disbursed => "DISBURSED",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether this status ends a loan's life by convention.
    ///
    /// Convention only: the engine still permits transitions out of a
    /// terminal status, so a wrongly closed loan can be reopened.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Closed)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a customer asks for when applying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// The product applied for.
    pub loan_type: LoanType,
    /// Principal requested.
    pub amount: Decimal,
    /// Negotiated annual rate in percent, if any. Only a strictly
    /// positive value overrides the product's base rate.
    pub requested_rate: Option<Decimal>,
    /// Repayment tenure in months, if already chosen.
    pub tenure_months: Option<i32>,
    /// Free-text purpose of the loan.
    pub purpose: Option<String>,
}

/// One loan, from application through servicing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// The product applied for.
    pub loan_type: LoanType,
    /// Principal.
    pub amount: Decimal,
    /// Annual rate in percent the loan was offered at.
    pub offered_interest_rate: Decimal,
    /// Repayment tenure in months.
    pub tenure_months: Option<i32>,
    /// Free-text purpose of the loan.
    pub purpose: Option<String>,
    /// Current lifecycle status.
    pub status: LoanStatus,
    /// Stored EMI figure. Refreshed only on request.
    pub monthly_emi: Decimal,
    /// When the application was opened.
    pub application_date: Timestamp,
    /// First instant the loan entered `Approved`.
    pub approval_date: Option<Timestamp>,
    /// First instant the loan entered `Disbursed`.
    pub disbursement_date: Option<Timestamp>,
    /// Scheduled maturity, disbursement date plus tenure.
    pub maturity_date: Option<Timestamp>,
    /// Amount still owed. Seeded with the principal at disbursement.
    pub outstanding_amount: Option<Decimal>,
    /// Record creation instant.
    pub created_at: Timestamp,
    /// Last mutation instant.
    pub updated_at: Timestamp,
}

impl LoanApplication {
    /// Open a fresh application in `Pending`.
    ///
    /// The offered rate is resolved from the request, and the initial
    /// EMI is computed when a tenure is present (zero otherwise).
    pub fn open(customer_id: CustomerId, request: LoanRequest, now: Timestamp) -> Self {
        let offered_interest_rate = resolve_rate(request.loan_type, request.requested_rate);
        let monthly_emi = match request.tenure_months {
            Some(months) => compute_emi(request.amount, offered_interest_rate, months),
            None => Decimal::ZERO,
        };

        Self {
            loan_id: LoanId::new(),
            customer_id,
            loan_type: request.loan_type,
            amount: request.amount,
            offered_interest_rate,
            tenure_months: request.tenure_months,
            purpose: request.purpose,
            status: LoanStatus::Pending,
            monthly_emi,
            application_date: now,
            approval_date: None,
            disbursement_date: None,
            maturity_date: None,
            outstanding_amount: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move the loan to `status`.
    ///
    /// Any status is reachable from any other. Entering `Approved` or
    /// `Disbursed` stamps the respective date only the first time.
    pub fn set_status(&mut self, status: LoanStatus, now: Timestamp) {
        if status == LoanStatus::Approved && self.approval_date.is_none() {
            self.approval_date = Some(now);
        }
        if status == LoanStatus::Disbursed && self.disbursement_date.is_none() {
            self.disbursement_date = Some(now);
            self.outstanding_amount = Some(self.amount);
        }
        self.status = status;
        self.touch(now);
    }

    /// Change the repayment tenure.
    ///
    /// After disbursement, a positive tenure recomputes the maturity
    /// date from the disbursement date; repeated changes each recompute
    /// and the latest wins. The stored EMI is left as is.
    pub fn change_tenure(&mut self, tenure_months: i32, now: Timestamp) {
        self.tenure_months = Some(tenure_months);
        if let Some(disbursed) = self.disbursement_date {
            if tenure_months > 0 {
                self.maturity_date = disbursed.checked_add_months(tenure_months as u32);
            }
        }
        self.touch(now);
    }

    /// Refresh the stored EMI from the current principal, rate and tenure.
    pub fn recompute_emi(&mut self, now: Timestamp) {
        self.monthly_emi = match self.tenure_months {
            Some(months) => compute_emi(self.amount, self.offered_interest_rate, months),
            None => Decimal::ZERO,
        };
        self.touch(now);
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

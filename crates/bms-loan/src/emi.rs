//! # EMI Computation
//!
//! The equated monthly installment for a reducing-balance loan:
//!
//! ```text
//! EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! where `P` is the principal, `r` the monthly rate (annual percent
//! divided by 12, then by 100) and `n` the tenure in months. A zero rate
//! degenerates to straight-line `P / n`, as does a positive rate too
//! small for the f64 power term to register. Results are rounded
//! half-up to two decimal places.
//!
//! Degenerate inputs are not errors: a non-positive principal or tenure
//! yields an EMI of zero, because an application may legitimately exist
//! before its tenure is chosen.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use bms_core::round_money;

/// Compute the equated monthly installment.
///
/// `annual_rate_percent` is the annual rate in percent (`9.5` means
/// 9.5% p.a.). Returns zero when `principal <= 0` or
/// `tenure_months <= 0`.
pub fn compute_emi(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: i32,
) -> Decimal {
    if tenure_months <= 0 || principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    if annual_rate_percent.is_zero() {
        return round_money(principal / Decimal::from(tenure_months));
    }

    // The amortization power term is evaluated in f64 and the result
    // rounded back to money precision.
    let p = principal.to_f64().unwrap_or(0.0);
    let monthly = annual_rate_percent.to_f64().unwrap_or(0.0) / 12.0 / 100.0;
    let factor = (1.0 + monthly).powi(tenure_months);
    let emi = p * monthly * factor / (factor - 1.0);
    match Decimal::from_f64_retain(emi) {
        Some(value) => round_money(value),
        // A sub-epsilon rate underflows the power term to exactly 1.0
        // and the quotient to infinity. Interest too small for f64 to
        // see repays straight-line, the same as a zero rate.
        None => round_money(principal / Decimal::from(tenure_months)),
    }
}

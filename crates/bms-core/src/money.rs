//! # Monetary Rounding
//!
//! Money amounts are `rust_decimal::Decimal` throughout the workspace.
//! Everything surfaced to a customer (EMIs, outstanding balances) is
//! rounded to two decimal places with half-up rounding, so `2.345`
//! rounds to `2.35` and `-2.345` to `-2.35`.

use rust_decimal::RoundingStrategy;

pub use rust_decimal::Decimal;

/// Round a monetary amount to two decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

//! # Loan Products — Types, Base Rates, Rate Resolution
//!
//! The five loan products on offer, each with a fixed annual base rate
//! in percent. Rate resolution is the one rule every application goes
//! through: a requested rate strictly greater than zero is honoured as
//! is, anything else falls back to the product's base rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The loan products on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanType {
    /// Unsecured loans for individual financial needs.
    Personal,
    /// Vehicle purchase loans.
    Car,
    /// Home purchase or construction loans.
    Home,
    /// Loans against gold collateral.
    Gold,
    /// Loans for educational expenses.
    Education,
}

impl LoanType {
    /// Every product, in catalog order.
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Car,
        LoanType::Home,
        LoanType::Gold,
        LoanType::Education,
    ];

    /// Annual base interest rate, in percent.
    pub fn base_rate(&self) -> Decimal {
        match self {
            Self::Personal => dec!(15.0),
            Self::Car => dec!(10.5),
            Self::Home => dec!(9.0),
            Self::Gold => dec!(12.0),
            Self::Education => dec!(9.5),
        }
    }

    /// Customer-facing product description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Personal => "Personal loans for individual financial needs",
            Self::Car => "Loans for purchasing vehicles",
            Self::Home => "Loans for purchasing or constructing homes",
            Self::Gold => "Loans against gold collateral",
            Self::Education => "Loans for educational expenses",
        }
    }

    /// Return the string representation of this product.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Car => "CAR",
            Self::Home => "HOME",
            Self::Gold => "GOLD",
            Self::Education => "EDUCATION",
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry: a product with its base rate and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    /// The product.
    pub loan_type: LoanType,
    /// Annual base interest rate, in percent.
    pub base_rate: Decimal,
    /// Customer-facing description.
    pub description: String,
}

/// The full product catalog, in [`LoanType::ALL`] order.
pub fn catalog() -> Vec<LoanProduct> {
    LoanType::ALL
        .iter()
        .map(|&loan_type| LoanProduct {
            loan_type,
            base_rate: loan_type.base_rate(),
            description: loan_type.description().to_string(),
        })
        .collect()
}

/// Resolve the rate a loan is offered at.
///
/// A requested rate strictly greater than zero wins. Zero, negative and
/// absent requests all fall back to the product's base rate.
pub fn resolve_rate(loan_type: LoanType, requested: Option<Decimal>) -> Decimal {
    match requested {
        Some(rate) if rate > Decimal::ZERO => rate,
        _ => loan_type.base_rate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rates() {
        assert_eq!(LoanType::Personal.base_rate(), dec!(15.0));
        assert_eq!(LoanType::Car.base_rate(), dec!(10.5));
        assert_eq!(LoanType::Home.base_rate(), dec!(9.0));
        assert_eq!(LoanType::Gold.base_rate(), dec!(12.0));
        assert_eq!(LoanType::Education.base_rate(), dec!(9.5));
    }

    #[test]
    fn test_resolve_rate_honours_positive_request() {
        assert_eq!(resolve_rate(LoanType::Home, Some(dec!(7.5))), dec!(7.5));
        assert_eq!(resolve_rate(LoanType::Personal, Some(dec!(0.01))), dec!(0.01));
    }

    #[test]
    fn test_resolve_rate_zero_request_falls_back() {
        assert_eq!(resolve_rate(LoanType::Home, Some(dec!(0))), dec!(9.0));
        assert_eq!(resolve_rate(LoanType::Home, Some(dec!(0.00))), dec!(9.0));
    }

    #[test]
    fn test_resolve_rate_negative_request_falls_back() {
        assert_eq!(resolve_rate(LoanType::Gold, Some(dec!(-3.5))), dec!(12.0));
    }

    #[test]
    fn test_resolve_rate_absent_request_falls_back() {
        assert_eq!(resolve_rate(LoanType::Education, None), dec!(9.5));
    }

    #[test]
    fn test_serde_names_are_screaming_snake() {
        let json = serde_json::to_string(&LoanType::Personal).unwrap();
        assert_eq!(json, "\"PERSONAL\"");
        let parsed: LoanType = serde_json::from_str("\"EDUCATION\"").unwrap();
        assert_eq!(parsed, LoanType::Education);
    }

    #[test]
    fn test_display_matches_name() {
        for loan_type in LoanType::ALL {
            assert_eq!(format!("{loan_type}"), loan_type.name());
        }
    }

    #[test]
    fn test_catalog_covers_every_product() {
        let catalog = catalog();
        assert_eq!(catalog.len(), LoanType::ALL.len());
        for (entry, loan_type) in catalog.iter().zip(LoanType::ALL) {
            assert_eq!(entry.loan_type, loan_type);
            assert_eq!(entry.base_rate, loan_type.base_rate());
            assert!(!entry.description.is_empty());
        }
    }
}

//! Loan type table: loan-to-value caps, maximum terms and fixed annual rates

mod validation;

pub use validation::{
    check_required_loan, check_years_to_pay, max_loan, validate_loan_amount, validate_term,
    within_loan_cap, LoanAmountCheck,
};

use crate::error::{LoanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Limits attached to a loan type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTypeRule {
    /// Maximum loan as a percentage of the declared property value
    pub max_loan_percentage: u32,

    /// Maximum repayment term in years
    pub max_years: u32,

    /// Fixed nominal annual interest rate, in percent (4.5 = 4.5%)
    pub interest_rate: f64,
}

/// The four mortgage products offered by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LoanType {
    FirstHome,
    SecondHome,
    CommercialProperty,
    Remodeling,
}

impl LoanType {
    /// All loan types in key order
    pub const ALL: [LoanType; 4] = [
        LoanType::FirstHome,
        LoanType::SecondHome,
        LoanType::CommercialProperty,
        LoanType::Remodeling,
    ];

    /// Loan-to-value cap, maximum term and fixed annual rate for this type
    pub const fn rule(self) -> LoanTypeRule {
        match self {
            LoanType::FirstHome => LoanTypeRule {
                max_loan_percentage: 80,
                max_years: 30,
                interest_rate: 4.5,
            },
            LoanType::SecondHome => LoanTypeRule {
                max_loan_percentage: 70,
                max_years: 20,
                interest_rate: 5.5,
            },
            LoanType::CommercialProperty => LoanTypeRule {
                max_loan_percentage: 60,
                max_years: 25,
                interest_rate: 6.5,
            },
            LoanType::Remodeling => LoanTypeRule {
                max_loan_percentage: 50,
                max_years: 15,
                interest_rate: 5.0,
            },
        }
    }

    /// Identifier used by the loan service ("1".."4")
    pub const fn key(self) -> &'static str {
        match self {
            LoanType::FirstHome => "1",
            LoanType::SecondHome => "2",
            LoanType::CommercialProperty => "3",
            LoanType::Remodeling => "4",
        }
    }

    /// Name shown in the loan type selector
    pub const fn label(self) -> &'static str {
        match self {
            LoanType::FirstHome => "Primera vivienda",
            LoanType::SecondHome => "Segunda vivienda",
            LoanType::CommercialProperty => "Propiedad comercial",
            LoanType::Remodeling => "Remodelación",
        }
    }
}

/// Look up the rule for a loan type key
pub fn lookup_rule(key: &str) -> Result<LoanTypeRule> {
    key.parse::<LoanType>().map(LoanType::rule)
}

impl FromStr for LoanType {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(LoanType::FirstHome),
            "2" => Ok(LoanType::SecondHome),
            "3" => Ok(LoanType::CommercialProperty),
            "4" => Ok(LoanType::Remodeling),
            other => Err(LoanError::UnknownLoanType(other.to_string())),
        }
    }
}

impl TryFrom<String> for LoanType {
    type Error = LoanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LoanType> for String {
    fn from(loan_type: LoanType) -> Self {
        loan_type.key().to_string()
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.rule();
        write!(
            f,
            "{}: {}% annual interest, max loan {}% of the property",
            self.label(),
            rule.interest_rate,
            rule.max_loan_percentage
        )
    }
}

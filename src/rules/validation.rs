//! Loan amount and term validation against the loan type table

use super::LoanType;
use crate::error::{LoanError, Result};
use crate::format::parse_amount;
use log::debug;

/// Outcome of checking a raw required-loan entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAmountCheck {
    /// Nothing entered yet; the field resets without an error
    Cleared,
    /// Amount within the loan-to-value cap
    Accepted(u64),
}

/// Maximum loan for a property value under the given loan type
pub fn max_loan(property_value: f64, loan_type: LoanType) -> f64 {
    property_value * loan_type.rule().max_loan_percentage as f64 / 100.0
}

/// Exact cap check on whole currency units: `required_loan * 100 <= property_value * pct`
pub fn within_loan_cap(property_value: u64, required_loan: u64, loan_type: LoanType) -> bool {
    let pct = loan_type.rule().max_loan_percentage as u128;
    (required_loan as u128) * 100 <= (property_value as u128) * pct
}

/// Check that `0 <= required_loan <= max_loan`
pub fn validate_loan_amount(property_value: f64, required_loan: f64, loan_type: LoanType) -> Result<()> {
    let max = max_loan(property_value, loan_type);
    if required_loan >= 0.0 && required_loan <= max {
        Ok(())
    } else {
        debug!("Rejected loan amount {} for {:?} (max {})", required_loan, loan_type, max);
        Err(LoanError::LoanAmountExceedsLimit {
            max_loan: max,
            max_loan_percentage: loan_type.rule().max_loan_percentage,
        })
    }
}

/// Check that `0 <= years_to_pay <= max_years`
pub fn validate_term(years_to_pay: i64, loan_type: LoanType) -> Result<()> {
    let max_years = loan_type.rule().max_years;
    if (0..=max_years as i64).contains(&years_to_pay) {
        Ok(())
    } else {
        debug!("Rejected term of {} years for {:?}", years_to_pay, loan_type);
        Err(LoanError::TermExceedsLimit { max_years })
    }
}

/// Validate a required-loan entry as typed by the user.
///
/// Separators and any other non-digit characters are ignored. Input with no
/// digits at all means the field was emptied and yields `Cleared`.
pub fn check_required_loan(property_value: u64, input: &str, loan_type: LoanType) -> Result<LoanAmountCheck> {
    let Some(amount) = parse_amount(input).map_err(|_| LoanError::InvalidNumber {
        field: "required loan",
        value: input.to_string(),
    })?
    else {
        return Ok(LoanAmountCheck::Cleared);
    };

    if !within_loan_cap(property_value, amount, loan_type) {
        debug!("Rejected loan amount {} for {:?} (property value {})", amount, loan_type, property_value);
        return Err(LoanError::LoanAmountExceedsLimit {
            max_loan: max_loan(property_value as f64, loan_type),
            max_loan_percentage: loan_type.rule().max_loan_percentage,
        });
    }
    Ok(LoanAmountCheck::Accepted(amount))
}

/// Validate a years-to-pay entry as typed by the user. Empty input yields `None`.
pub fn check_years_to_pay(input: &str, loan_type: LoanType) -> Result<Option<u32>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let years: i64 = trimmed.parse().map_err(|_| LoanError::InvalidNumber {
        field: "years to pay",
        value: input.to_string(),
    })?;
    validate_term(years, loan_type)?;
    Ok(Some(years as u32))
}

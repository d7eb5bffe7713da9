//! Side-by-side quotes for every loan type at its maximum amount and term

use super::compute_monthly_payment;
use crate::error::Result;
use crate::rules::{max_loan, LoanType};
use rayon::prelude::*;
use serde::Serialize;

/// Best-case quote for one loan type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTypeQuote {
    pub loan_type: LoanType,
    pub max_loan: f64,
    pub max_years: u32,
    pub interest_rate: f64,
    pub monthly_payment: f64,
}

/// Quote each loan type for a property value, in key order
pub fn compare_loan_types(property_value: f64) -> Result<Vec<LoanTypeQuote>> {
    LoanType::ALL[..]
        .par_iter()
        .map(|&loan_type| -> Result<LoanTypeQuote> {
            let rule = loan_type.rule();
            let amount = max_loan(property_value, loan_type);
            let monthly_payment = compute_monthly_payment(amount, rule.interest_rate, rule.max_years as i64)?;
            Ok(LoanTypeQuote {
                loan_type,
                max_loan: amount,
                max_years: rule.max_years,
                interest_rate: rule.interest_rate,
                monthly_payment,
            })
        })
        .collect()
}

//! Loan type, property value, amount and term as entered on either screen

use super::SimulationRequest;
use crate::error::{LoanError, Result};
use crate::format::{format_amount, parse_amount};
use crate::rules::{check_required_loan, check_years_to_pay, max_loan, within_loan_cap, LoanAmountCheck, LoanType};
use log::debug;

/// Loan terms shared by the application form and the simulator.
///
/// Every stored value is valid for the selected loan type: choosing a type
/// clears amount and term, and a property value that no longer covers the
/// entered amount clears the amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanTerms {
    loan_type: Option<LoanType>,
    property_value: Option<u64>,
    required_loan: Option<u64>,
    years_to_pay: Option<u32>,
}

impl LoanTerms {
    /// Empty terms with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected loan type, if any
    pub fn loan_type(&self) -> Option<LoanType> {
        self.loan_type
    }

    /// Property value in whole currency units
    pub fn property_value(&self) -> Option<u64> {
        self.property_value
    }

    /// Accepted required loan in whole currency units
    pub fn required_loan(&self) -> Option<u64> {
        self.required_loan
    }

    /// Accepted term in years
    pub fn years_to_pay(&self) -> Option<u32> {
        self.years_to_pay
    }

    /// Annual rate fixed by the selected loan type, in percent
    pub fn interest_rate(&self) -> Option<f64> {
        self.loan_type.map(|t| t.rule().interest_rate)
    }

    /// Cap on the required loan for the current type and property value
    pub fn max_loan(&self) -> Option<f64> {
        Some(max_loan(self.property_value? as f64, self.loan_type?))
    }

    /// Select a loan type. Amount and term are always reset since the limits change.
    pub fn select_loan_type(&mut self, loan_type: LoanType) {
        self.loan_type = Some(loan_type);
        self.required_loan = None;
        self.years_to_pay = None;
    }

    /// Select a loan type by its service key ("1".."4")
    pub fn select_loan_type_key(&mut self, key: &str) -> Result<()> {
        let loan_type = key.parse()?;
        self.select_loan_type(loan_type);
        Ok(())
    }

    /// Update the property value from raw input. An entered amount above the
    /// new cap, or any amount once the value is emptied, is cleared.
    pub fn set_property_value(&mut self, input: &str) -> Result<()> {
        self.property_value = parse_amount(input).map_err(|_| LoanError::InvalidNumber {
            field: "property value",
            value: input.to_string(),
        })?;

        let still_valid = match (self.property_value, self.required_loan, self.loan_type) {
            (Some(value), Some(loan), Some(loan_type)) => {
                within_loan_cap(value, loan, loan_type)
            }
            (None, Some(_), _) => false,
            _ => true,
        };
        if !still_valid {
            debug!("Property value changed, clearing required loan {:?}", self.required_loan);
            self.required_loan = None;
        }
        Ok(())
    }

    /// Update the required loan from raw input.
    ///
    /// Input without digits clears the field silently. An amount over the cap
    /// is rejected and the previous amount is kept.
    pub fn set_required_loan(&mut self, input: &str) -> Result<()> {
        let (Some(loan_type), Some(property_value)) = (self.loan_type, self.property_value) else {
            return Err(LoanError::FieldLocked {
                field: "required loan",
                requires: "loan type and property value",
            });
        };

        match check_required_loan(property_value, input, loan_type)? {
            LoanAmountCheck::Cleared => self.required_loan = None,
            LoanAmountCheck::Accepted(amount) => self.required_loan = Some(amount),
        }
        Ok(())
    }

    /// Update the term from raw input. Empty input clears it.
    pub fn set_years_to_pay(&mut self, input: &str) -> Result<()> {
        let Some(loan_type) = self.loan_type else {
            return Err(LoanError::FieldLocked {
                field: "years to pay",
                requires: "loan type",
            });
        };

        self.years_to_pay = check_years_to_pay(input, loan_type)?;
        Ok(())
    }

    /// Grouped display value of the property value ("" when unset)
    pub fn property_value_display(&self, separator: char) -> String {
        self.property_value.map(|v| format_amount(v, separator)).unwrap_or_default()
    }

    /// Grouped display value of the required loan ("" when unset)
    pub fn required_loan_display(&self, separator: char) -> String {
        self.required_loan.map(|v| format_amount(v, separator)).unwrap_or_default()
    }

    pub(crate) fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.loan_type.is_none() {
            missing.push("loan type");
        }
        if self.property_value.is_none() {
            missing.push("property value");
        }
        if self.required_loan.is_none() {
            missing.push("required loan");
        }
        if self.years_to_pay.is_none() {
            missing.push("years to pay");
        }
        missing
    }

    /// Build the request for the payment simulation
    pub fn simulation_request(&self) -> Result<SimulationRequest> {
        match (self.loan_type, self.required_loan, self.years_to_pay) {
            (Some(loan_type), Some(loan_amount), Some(year_payments)) => Ok(SimulationRequest {
                loan_amount: loan_amount as f64,
                year_interest_rate: loan_type.rule().interest_rate,
                year_payments,
            }),
            _ => Err(LoanError::IncompleteApplication {
                missing: self.missing_fields(),
            }),
        }
    }
}

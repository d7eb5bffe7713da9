//! Month-by-month amortization schedule

use super::{compute_monthly_payment, monthly_rate, MONTHS_PER_YEAR};
use crate::error::{LoanError, Result};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// One installment of the schedule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full repayment schedule for a fixed-rate loan
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub monthly_payment: f64,
    pub rows: Vec<AmortizationRow>,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl AmortizationSchedule {
    /// Build the schedule; fails with `InvalidTerm` when the installment count
    /// does not fit a `u32` month index.
    pub fn build(loan_amount: f64, annual_rate_percent: f64, term_years: i64) -> Result<Self> {
        let monthly_payment = compute_monthly_payment(loan_amount, annual_rate_percent, term_years)?;
        let r = monthly_rate(annual_rate_percent);
        let total_months = term_years.saturating_mul(MONTHS_PER_YEAR);
        let months = u32::try_from(total_months).map_err(|_| LoanError::InvalidTerm { months: total_months })?;

        let mut rows = Vec::with_capacity(months as usize);
        let mut balance = loan_amount;
        let mut total_paid = 0.0;
        let mut total_interest = 0.0;

        for month in 1..=months {
            let interest = balance * r;
            // Last installment settles whatever float residue is left
            let (payment, principal) = if month == months {
                (balance + interest, balance)
            } else {
                (monthly_payment, monthly_payment - interest)
            };
            let closing_balance = if month == months { 0.0 } else { balance - principal };

            rows.push(AmortizationRow {
                month,
                opening_balance: balance,
                payment,
                interest,
                principal,
                closing_balance,
            });

            total_paid += payment;
            total_interest += interest;
            balance = closing_balance;
        }

        Ok(Self {
            monthly_payment,
            rows,
            total_paid,
            total_interest,
        })
    }

    /// Write the schedule as CSV to any writer
    pub fn to_csv_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the schedule as CSV to `path`
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_csv_writer(File::create(path)?)
    }
}

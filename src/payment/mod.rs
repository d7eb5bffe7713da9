//! Fixed-rate amortization: monthly payment, full schedule and per-type quotes

mod schedule;
mod comparison;

pub use schedule::{AmortizationRow, AmortizationSchedule};
pub use comparison::{compare_loan_types, LoanTypeQuote};

use crate::error::{LoanError, Result};

/// Installments per year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Monthly rate from an annual nominal rate given in percent (4.5 -> 0.00375)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}

/// Level monthly payment for a fixed-rate loan.
///
/// `payment = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and
/// `n` the number of installments; `P / n` when the rate is zero.
/// Evaluated as `P * r / (1 - (1+r)^-n)`, which tends to `P * r` instead of
/// overflowing for very long terms. The result is not rounded.
pub fn compute_monthly_payment(loan_amount: f64, annual_rate_percent: f64, term_years: i64) -> Result<f64> {
    let months = term_years.saturating_mul(MONTHS_PER_YEAR);
    if months <= 0 {
        return Err(LoanError::InvalidTerm { months });
    }
    if !loan_amount.is_finite() || loan_amount < 0.0 {
        return Err(LoanError::InvalidNumber {
            field: "loan amount",
            value: loan_amount.to_string(),
        });
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(LoanError::InvalidNumber {
            field: "interest rate",
            value: annual_rate_percent.to_string(),
        });
    }

    let r = monthly_rate(annual_rate_percent);
    let n = months as f64;
    if r == 0.0 {
        return Ok(loan_amount / n);
    }

    Ok(loan_amount * r / (1.0 - (1.0 + r).powf(-n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_home_payment() {
        let payment = compute_monthly_payment(80_000_000.0, 4.5, 30).unwrap();
        assert_relative_eq!(payment, 405_348.2478607, max_relative = 1e-9);
        assert_eq!(payment.round(), 405_348.0);
    }

    #[test]
    fn test_zero_rate() {
        let payment = compute_monthly_payment(1_200.0, 0.0, 1).unwrap();
        assert_eq!(payment, 100.0);
    }

    #[test]
    fn test_invalid_term() {
        assert!(matches!(
            compute_monthly_payment(1_000.0, 5.0, 0),
            Err(LoanError::InvalidTerm { months: 0 })
        ));
        assert!(matches!(
            compute_monthly_payment(1_000.0, 5.0, -2),
            Err(LoanError::InvalidTerm { months: -24 })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_monthly_payment(-1.0, 5.0, 10).is_err());
        assert!(compute_monthly_payment(f64::NAN, 5.0, 10).is_err());
        assert!(compute_monthly_payment(1_000.0, -0.5, 10).is_err());
    }

    #[test]
    fn test_monotonicity() {
        let base = compute_monthly_payment(50_000_000.0, 5.0, 20).unwrap();

        let more_principal = compute_monthly_payment(60_000_000.0, 5.0, 20).unwrap();
        assert!(more_principal > base);

        let higher_rate = compute_monthly_payment(50_000_000.0, 6.5, 20).unwrap();
        assert!(higher_rate > base);

        let longer_term = compute_monthly_payment(50_000_000.0, 5.0, 25).unwrap();
        assert!(longer_term < base);
    }

    #[test]
    fn test_total_paid_closed_form() {
        let (amount, rate, years) = (70_000_000.0, 5.5, 20);
        let r = monthly_rate(rate);
        let n = (years * 12) as f64;
        let expected_total = amount * (1.0 + r).powf(n) * r / ((1.0 + r).powf(n) - 1.0) * n;

        let payment = compute_monthly_payment(amount, rate, years).unwrap();
        assert_relative_eq!(payment * n, expected_total, max_relative = 1e-10);
    }

    #[test]
    fn test_very_long_term_tends_to_interest_only() {
        let payment = compute_monthly_payment(80_000_000.0, 4.5, 20_000).unwrap();
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 80_000_000.0 * monthly_rate(4.5), max_relative = 1e-9);

        let request = crate::application::SimulationRequest {
            loan_amount: 80_000_000.0,
            year_interest_rate: 4.5,
            year_payments: 20_000,
        };
        let json = serde_json::json!(request.monthly_payment().unwrap());
        assert!(json.is_f64());
    }
}

//! Error taxonomy for loan validation, amortization and the remote service calls

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, LoanError>;

/// Everything that can go wrong while filling, simulating or submitting a loan
#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Unknown loan type: {0:?}")]
    UnknownLoanType(String),

    #[error("Maximum loan allowed is {max_loan_percentage}% of the property value (maximum amount: {max_loan})")]
    LoanAmountExceedsLimit {
        max_loan: f64,
        max_loan_percentage: u32,
    },

    #[error("Maximum term allowed is {max_years} years")]
    TermExceedsLimit { max_years: u32 },

    #[error("Invalid term: {months} monthly installments")]
    InvalidTerm { months: i64 },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid document type {media_type:?}, only {expected} is accepted")]
    InvalidDocumentType {
        media_type: String,
        expected: &'static str,
    },

    #[error("{field} cannot be edited until {requires} is set")]
    FieldLocked {
        field: &'static str,
        requires: &'static str,
    },

    #[error("Application is incomplete, missing: {}", .missing.join(", "))]
    IncompleteApplication { missing: Vec<&'static str> },

    #[error("Application was already submitted")]
    DraftSubmitted,

    #[error("Loan application submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Payment simulation failed: {0}")]
    SimulationFailed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanError {
    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LoanError::UnknownLoanType(_)
                | LoanError::LoanAmountExceedsLimit { .. }
                | LoanError::TermExceedsLimit { .. }
                | LoanError::InvalidTerm { .. }
                | LoanError::InvalidNumber { .. }
                | LoanError::InvalidDocumentType { .. }
                | LoanError::FieldLocked { .. }
                | LoanError::IncompleteApplication { .. }
        )
    }
}

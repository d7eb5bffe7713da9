//! Loan Portal - mortgage loan eligibility rules and repayment estimates
//!
//! This library provides:
//! - The fixed loan type table (loan-to-value cap, maximum term, annual rate)
//! - Validation of requested amounts and terms against that table
//! - Fixed-rate amortization: monthly payment, schedules, per-type quotes
//! - Application and simulation form state with validated setters
//! - The loan service seam used to submit applications and run simulations

pub mod error;
pub mod config;
pub mod format;
pub mod rules;
pub mod payment;
pub mod application;
pub mod service;
pub mod forms;

// Re-export commonly used types
pub use error::{LoanError, Result};
pub use config::PortalConfig;
pub use rules::{lookup_rule, validate_loan_amount, validate_term, LoanType, LoanTypeRule};
pub use payment::{compute_monthly_payment, AmortizationSchedule};
pub use format::format_thousands;
pub use application::{DraftState, LoanApplication, LoanApplicationDraft, LoanTerms, SimulationRequest, SupportingDocument};
pub use service::{LoanService, LocalLoanService, ServiceError};
pub use forms::{ApplyForLoanForm, SimulationForm};

//! Loan service seam: persisting applications and estimating payments
//!
//! The portal only ever talks to the service through [`LoanService`].
//! [`LocalLoanService`] answers in-process and backs the Lambda handler.

mod local;

pub use local::{LocalLoanService, StoredApplication};

use crate::application::{LoanApplication, SimulationRequest, SupportingDocument};
use std::future::Future;
use thiserror::Error;

/// Opaque failure reported by the loan service
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Remote operations consumed by the loan forms.
///
/// Calls are not retried or cancelled; callers surface failures to the user.
pub trait LoanService {
    /// Persist an application together with its optional supporting document
    fn submit_loan_application(
        &self,
        application: &LoanApplication,
        document: Option<&SupportingDocument>,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Monthly payment estimate for the request
    fn simulate_payment(&self, request: &SimulationRequest) -> impl Future<Output = Result<f64, ServiceError>> + Send;
}

//! In-process loan service

use super::{LoanService, ServiceError};
use crate::application::{LoanApplication, SimulationRequest, SupportingDocument, ACCEPTED_DOCUMENT_TYPE};
use crate::rules::validate_term;
use log::info;
use std::sync::Mutex;

/// Accepted application with the name of its attached document, if any
#[derive(Debug, Clone, PartialEq)]
pub struct StoredApplication {
    pub application: LoanApplication,
    pub document_name: Option<String>,
}

/// Loan service that computes estimates locally and keeps applications in memory.
///
/// The store is ephemeral: it lives as long as this value and nothing is
/// persisted, so a restarted process (or a Lambda cold start) begins empty.
#[derive(Debug, Default)]
pub struct LocalLoanService {
    applications: Mutex<Vec<StoredApplication>>,
}

impl LocalLoanService {
    /// Service with an empty application store
    pub fn new() -> Self {
        Self::default()
    }

    /// Applications accepted so far, oldest first
    pub fn applications(&self) -> Vec<StoredApplication> {
        match self.applications.lock() {
            Ok(stored) => stored.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Check an incoming application and store it
    pub fn accept(
        &self,
        application: &LoanApplication,
        document: Option<&SupportingDocument>,
    ) -> Result<(), ServiceError> {
        let rule = application.loan_type.rule();
        if application.year_interest != rule.interest_rate {
            return Err(ServiceError::new(format!(
                "interest rate {} does not match loan type {} ({})",
                application.year_interest,
                application.loan_type.key(),
                rule.interest_rate
            )));
        }
        validate_term(application.max_duration as i64, application.loan_type)
            .map_err(|e| ServiceError::new(e.to_string()))?;
        if let Some(doc) = document {
            if doc.media_type != ACCEPTED_DOCUMENT_TYPE {
                return Err(ServiceError::new(format!("unsupported document type {}", doc.media_type)));
            }
        }

        let mut stored = self
            .applications
            .lock()
            .map_err(|_| ServiceError::new("application store unavailable"))?;
        stored.push(StoredApplication {
            application: application.clone(),
            document_name: document.map(|d| d.file_name.clone()),
        });
        info!(
            "Stored application #{} for user {} ({} over {} years)",
            stored.len(),
            application.applicant_id,
            application.loan_amount,
            application.max_duration
        );
        Ok(())
    }
}

impl LoanService for LocalLoanService {
    async fn submit_loan_application(
        &self,
        application: &LoanApplication,
        document: Option<&SupportingDocument>,
    ) -> Result<(), ServiceError> {
        self.accept(application, document)
    }

    async fn simulate_payment(&self, request: &SimulationRequest) -> Result<f64, ServiceError> {
        request.monthly_payment().map_err(|e| ServiceError::new(e.to_string()))
    }
}

//! Loan application screen

use crate::application::LoanApplicationDraft;
use crate::error::{LoanError, Result};
use crate::service::LoanService;
use log::{info, warn};

/// Application screen: owns the draft and submits it through `S`
pub struct ApplyForLoanForm<S> {
    service: S,
    draft: LoanApplicationDraft,
    notice: Option<String>,
}

impl<S: LoanService> ApplyForLoanForm<S> {
    /// Form with an empty draft for `applicant_id`
    pub fn new(service: S, applicant_id: impl Into<String>) -> Self {
        Self {
            service,
            draft: LoanApplicationDraft::new(applicant_id),
            notice: None,
        }
    }

    /// Current draft
    pub fn draft(&self) -> &LoanApplicationDraft {
        &self.draft
    }

    /// Service the form submits to
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Last message shown to the applicant
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply one input event to the draft
    pub fn update<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LoanApplicationDraft) -> Result<()>,
    {
        match edit(&mut self.draft) {
            Ok(()) => {
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Send the application. On failure the draft stays as it was so the
    /// applicant can retry without re-entering anything.
    pub async fn submit(&mut self) -> Result<()> {
        let application = match self.draft.to_application() {
            Ok(application) => application,
            Err(e) => {
                self.notice = Some(e.to_string());
                return Err(e);
            }
        };

        let outcome = self
            .service
            .submit_loan_application(&application, self.draft.document())
            .await;

        match outcome {
            Ok(()) => {
                info!(
                    "Loan application sent for user {} (type {})",
                    application.applicant_id,
                    application.loan_type.key()
                );
                self.draft.mark_submitted();
                self.notice = Some("Loan application sent".to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Loan application submission failed: {}", e);
                let err = LoanError::SubmissionFailed(e.to_string());
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{DraftState, LoanApplication, SimulationRequest, SupportingDocument};
    use crate::service::{LocalLoanService, ServiceError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` submissions, then accepts
    struct FlakyService {
        failures: usize,
        calls: AtomicUsize,
    }

    impl LoanService for FlakyService {
        async fn submit_loan_application(
            &self,
            _application: &LoanApplication,
            _document: Option<&SupportingDocument>,
        ) -> std::result::Result<(), ServiceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(ServiceError::new("503 Service Unavailable"))
            } else {
                Ok(())
            }
        }

        async fn simulate_payment(&self, _request: &SimulationRequest) -> std::result::Result<f64, ServiceError> {
            Err(ServiceError::new("not used"))
        }
    }

    fn fill<S: LoanService>(form: &mut ApplyForLoanForm<S>) {
        form.update(|d| d.select_loan_type_key("2")).unwrap();
        form.update(|d| d.set_property_value("120.000.000")).unwrap();
        form.update(|d| d.set_required_loan("84.000.000")).unwrap();
        form.update(|d| d.set_years_to_pay("20")).unwrap();
        form.update(|d| d.set_income("3.000.000")).unwrap();
        form.update(|d| d.set_veteran_years(2.5)).unwrap();
        form.update(|d| d.set_total_debt("500.000")).unwrap();
        form.update(|d| d.set_independent(true)).unwrap();
    }

    #[tokio::test]
    async fn test_submit_with_local_service() {
        let mut form = ApplyForLoanForm::new(LocalLoanService::new(), "11");
        fill(&mut form);
        form.update(|d| d.attach_document(SupportingDocument::pdf("docs.pdf", vec![1]))).unwrap();

        form.submit().await.unwrap();
        assert_eq!(form.draft().state(), DraftState::Submitted);
        assert_eq!(form.notice(), Some("Loan application sent"));

        let stored = form.service().applications();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].application.loan_amount, 84_000_000);
        assert!(stored[0].application.is_independent);

        // A submitted draft cannot be sent twice
        assert!(matches!(form.submit().await, Err(LoanError::DraftSubmitted)));
        assert_eq!(form.service().applications().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft_for_retry() {
        let service = FlakyService { failures: 1, calls: AtomicUsize::new(0) };
        let mut form = ApplyForLoanForm::new(service, "11");
        fill(&mut form);

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, LoanError::SubmissionFailed(_)));
        assert_eq!(form.draft().state(), DraftState::ReadyToSubmit);
        assert_eq!(form.draft().terms().required_loan(), Some(84_000_000));
        assert!(form.notice().unwrap().contains("503"));

        form.submit().await.unwrap();
        assert_eq!(form.draft().state(), DraftState::Submitted);
    }

    #[tokio::test]
    async fn test_incomplete_draft_not_sent() {
        let mut form = ApplyForLoanForm::new(LocalLoanService::new(), "11");
        form.update(|d| d.select_loan_type_key("1")).unwrap();

        assert!(matches!(form.submit().await, Err(LoanError::IncompleteApplication { .. })));
        assert!(form.service().applications().is_empty());
    }

    #[test]
    fn test_rejected_edit_sets_notice() {
        let mut form = ApplyForLoanForm::new(LocalLoanService::new(), "11");
        form.update(|d| d.select_loan_type_key("4")).unwrap();
        assert!(form.update(|d| d.set_years_to_pay("16")).is_err());
        assert_eq!(form.notice(), Some("Maximum term allowed is 15 years"));

        form.update(|d| d.set_years_to_pay("15")).unwrap();
        assert_eq!(form.notice(), None);
    }
}

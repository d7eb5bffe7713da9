//! Repayment simulator screen

use crate::application::LoanTerms;
use crate::error::{LoanError, Result};
use crate::format::format_payment;
use crate::service::LoanService;
use log::{debug, warn};

/// Simulator screen: owns the terms and asks `S` for an estimate
pub struct SimulationForm<S> {
    service: S,
    terms: LoanTerms,
    monthly_payment: Option<f64>,
    notice: Option<String>,
}

impl<S: LoanService> SimulationForm<S> {
    /// Form with empty terms and no estimate
    pub fn new(service: S) -> Self {
        Self {
            service,
            terms: LoanTerms::new(),
            monthly_payment: None,
            notice: None,
        }
    }

    /// Terms as entered so far
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// Last message shown to the user
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Last computed payment, unrounded
    pub fn monthly_payment(&self) -> Option<f64> {
        self.monthly_payment
    }

    /// Last computed payment rounded to whole units ("" before the first calculation)
    pub fn monthly_payment_display(&self, separator: char) -> String {
        self.monthly_payment
            .map(|p| format_payment(p, separator))
            .unwrap_or_default()
    }

    /// Apply one input event. Any accepted change to the terms discards the
    /// previous estimate since it no longer matches the inputs.
    pub fn update<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LoanTerms) -> Result<()>,
    {
        let before = self.terms.clone();
        match edit(&mut self.terms) {
            Ok(()) => {
                if self.terms != before {
                    self.monthly_payment = None;
                }
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ask the service for the monthly payment. A failure keeps the previous estimate.
    pub async fn calculate(&mut self) -> Result<f64> {
        let request = match self.terms.simulation_request() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.to_string());
                return Err(e);
            }
        };
        debug!("Simulating {:?}", request);

        match self.service.simulate_payment(&request).await {
            Ok(payment) => {
                self.monthly_payment = Some(payment);
                self.notice = None;
                Ok(payment)
            }
            Err(e) => {
                warn!("Payment simulation failed: {}", e);
                let err = LoanError::SimulationFailed(e.to_string());
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{LoanApplication, SimulationRequest, SupportingDocument};
    use crate::rules::LoanType;
    use crate::service::{LocalLoanService, ServiceError};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fails while `down` is set
    struct SwitchableService {
        inner: LocalLoanService,
        down: AtomicBool,
    }

    impl LoanService for SwitchableService {
        async fn submit_loan_application(
            &self,
            application: &LoanApplication,
            document: Option<&SupportingDocument>,
        ) -> std::result::Result<(), ServiceError> {
            self.inner.accept(application, document)
        }

        async fn simulate_payment(&self, request: &SimulationRequest) -> std::result::Result<f64, ServiceError> {
            if self.down.load(Ordering::SeqCst) {
                Err(ServiceError::new("connection refused"))
            } else {
                self.inner.simulate_payment(request).await
            }
        }
    }

    fn first_home_form() -> SimulationForm<LocalLoanService> {
        let mut form = SimulationForm::new(LocalLoanService::new());
        form.update(|t| t.select_loan_type_key("1")).unwrap();
        form.update(|t| t.set_property_value("100000000")).unwrap();
        form.update(|t| t.set_required_loan("80000000")).unwrap();
        form.update(|t| t.set_years_to_pay("30")).unwrap();
        form
    }

    #[tokio::test]
    async fn test_calculate() {
        let mut form = first_home_form();
        form.calculate().await.unwrap();
        assert_eq!(form.monthly_payment_display('.'), "405.348");
    }

    #[tokio::test]
    async fn test_change_of_type_clears_estimate() {
        let mut form = first_home_form();
        form.calculate().await.unwrap();

        form.update(|t| {
            t.select_loan_type(LoanType::SecondHome);
            Ok(())
        })
        .unwrap();
        assert_eq!(form.monthly_payment(), None);
        assert_eq!(form.terms().required_loan(), None);
        assert_eq!(form.terms().years_to_pay(), None);
        assert!(matches!(form.calculate().await, Err(LoanError::IncompleteApplication { .. })));
    }

    #[tokio::test]
    async fn test_rejected_edit_keeps_estimate() {
        let mut form = first_home_form();
        let payment = form.calculate().await.unwrap();

        assert!(form.update(|t| t.set_years_to_pay("31")).is_err());
        assert_eq!(form.monthly_payment(), Some(payment));
        assert_eq!(form.notice(), Some("Maximum term allowed is 30 years"));
    }

    #[tokio::test]
    async fn test_service_failure_keeps_previous_result() {
        let service = SwitchableService {
            inner: LocalLoanService::new(),
            down: AtomicBool::new(false),
        };
        let mut form = SimulationForm::new(service);
        form.update(|t| t.select_loan_type_key("4")).unwrap();
        form.update(|t| t.set_property_value("10000000")).unwrap();
        form.update(|t| t.set_required_loan("5000000")).unwrap();
        form.update(|t| t.set_years_to_pay("15")).unwrap();
        let payment = form.calculate().await.unwrap();

        form.service.down.store(true, Ordering::SeqCst);
        let err = form.calculate().await.unwrap_err();
        assert!(matches!(err, LoanError::SimulationFailed(_)));
        assert_eq!(form.monthly_payment(), Some(payment));
        assert_eq!(form.notice(), Some("Payment simulation failed: connection refused"));
    }
}

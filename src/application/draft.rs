//! Loan application draft held while the applicant fills the form

use super::{LoanApplication, LoanTerms};
use crate::error::{LoanError, Result};
use crate::format::parse_amount;
use crate::rules::LoanType;
use chrono::Utc;
use log::debug;

/// The only media type accepted for supporting documents
pub const ACCEPTED_DOCUMENT_TYPE: &str = "application/pdf";

/// Proof of income and identity attached to an application
#[derive(Debug, Clone, PartialEq)]
pub struct SupportingDocument {
    pub file_name: String,
    pub media_type: String,
    pub contents: Vec<u8>,
}

impl SupportingDocument {
    /// Document with an explicit media type
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            contents,
        }
    }

    /// PDF document, the only type the service accepts
    pub fn pdf(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self::new(file_name, ACCEPTED_DOCUMENT_TYPE, contents)
    }
}

/// Where a draft is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// No loan type chosen
    Empty,
    /// Loan type chosen, property value still missing
    LoanTypeSelected,
    /// Loan type and property value known; dependent fields open
    FieldsEditable,
    /// Every required field present and valid
    ReadyToSubmit,
    /// Handed to the loan service; no further edits
    Submitted,
}

#[derive(Debug, Clone, Default)]
pub struct LoanApplicationDraft {
    applicant_id: String,
    terms: LoanTerms,
    income: Option<u64>,
    total_debt: Option<u64>,
    veteran_years: Option<f64>,
    is_independent: Option<bool>,
    document: Option<SupportingDocument>,
    submitted: bool,
}

impl LoanApplicationDraft {
    /// Empty draft for an applicant
    pub fn new(applicant_id: impl Into<String>) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            ..Default::default()
        }
    }

    /// Service id of the applicant
    pub fn applicant_id(&self) -> &str {
        &self.applicant_id
    }

    /// Loan type, property value, amount and term
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// Declared income in whole currency units
    pub fn income(&self) -> Option<u64> {
        self.income
    }

    /// Declared outstanding debt in whole currency units
    pub fn total_debt(&self) -> Option<u64> {
        self.total_debt
    }

    /// Years at the current job
    pub fn veteran_years(&self) -> Option<f64> {
        self.veteran_years
    }

    /// Whether the applicant is self-employed
    pub fn is_independent(&self) -> Option<bool> {
        self.is_independent
    }

    /// Attached supporting document, if any
    pub fn document(&self) -> Option<&SupportingDocument> {
        self.document.as_ref()
    }

    /// Lifecycle state derived from the filled-in fields
    pub fn state(&self) -> DraftState {
        if self.submitted {
            DraftState::Submitted
        } else if self.terms.loan_type().is_none() {
            DraftState::Empty
        } else if self.terms.property_value().is_none() {
            DraftState::LoanTypeSelected
        } else if self.missing_fields().is_empty() {
            DraftState::ReadyToSubmit
        } else {
            DraftState::FieldsEditable
        }
    }

    /// Required fields not yet filled in, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.terms.missing_fields();
        if self.income.is_none() {
            missing.push("income");
        }
        if self.veteran_years.is_none() {
            missing.push("veteran years");
        }
        if self.total_debt.is_none() {
            missing.push("total debt");
        }
        if self.is_independent.is_none() {
            missing.push("independent worker");
        }
        missing
    }

    fn ensure_open(&self) -> Result<()> {
        if self.submitted {
            Err(LoanError::DraftSubmitted)
        } else {
            Ok(())
        }
    }

    pub fn select_loan_type(&mut self, loan_type: LoanType) -> Result<()> {
        self.ensure_open()?;
        self.terms.select_loan_type(loan_type);
        Ok(())
    }

    pub fn select_loan_type_key(&mut self, key: &str) -> Result<()> {
        self.ensure_open()?;
        self.terms.select_loan_type_key(key)
    }

    pub fn set_property_value(&mut self, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.terms.set_property_value(input)
    }

    pub fn set_required_loan(&mut self, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.terms.set_required_loan(input)
    }

    pub fn set_years_to_pay(&mut self, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.terms.set_years_to_pay(input)
    }

    pub fn set_income(&mut self, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.income = parse_money("income", input)?;
        Ok(())
    }

    pub fn set_total_debt(&mut self, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.total_debt = parse_money("total debt", input)?;
        Ok(())
    }

    /// Set years at the current job; must be finite and non-negative
    pub fn set_veteran_years(&mut self, years: f64) -> Result<()> {
        self.ensure_open()?;
        if !years.is_finite() || years < 0.0 {
            debug!("Rejected veteran years {}", years);
            return Err(LoanError::InvalidNumber {
                field: "veteran years",
                value: years.to_string(),
            });
        }
        self.veteran_years = Some(years);
        Ok(())
    }

    pub fn set_independent(&mut self, independent: bool) -> Result<()> {
        self.ensure_open()?;
        self.is_independent = Some(independent);
        Ok(())
    }

    /// Attach the supporting document. A document of the wrong type is
    /// rejected and also removes any previously attached one.
    pub fn attach_document(&mut self, document: SupportingDocument) -> Result<()> {
        self.ensure_open()?;
        if document.media_type != ACCEPTED_DOCUMENT_TYPE {
            debug!("Rejected document {} ({})", document.file_name, document.media_type);
            self.document = None;
            return Err(LoanError::InvalidDocumentType {
                media_type: document.media_type,
                expected: ACCEPTED_DOCUMENT_TYPE,
            });
        }
        self.document = Some(document);
        Ok(())
    }

    /// Remove the attached document
    pub fn clear_document(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.document = None;
        Ok(())
    }

    /// Snapshot the draft for submission
    pub fn to_application(&self) -> Result<LoanApplication> {
        self.ensure_open()?;
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(LoanError::IncompleteApplication { missing });
        }

        match (
            self.terms.loan_type(),
            self.terms.required_loan(),
            self.terms.years_to_pay(),
            self.income,
            self.veteran_years,
            self.total_debt,
            self.is_independent,
        ) {
            (
                Some(loan_type),
                Some(loan_amount),
                Some(max_duration),
                Some(income),
                Some(veteran),
                Some(total_debt),
                Some(is_independent),
            ) => Ok(LoanApplication {
                applicant_id: self.applicant_id.clone(),
                loan_type,
                year_interest: loan_type.rule().interest_rate,
                max_duration,
                income,
                veteran,
                total_debt,
                loan_amount,
                is_independent,
                submitted_at: Utc::now(),
            }),
            _ => Err(LoanError::IncompleteApplication {
                missing: self.missing_fields(),
            }),
        }
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}

fn parse_money(field: &'static str, input: &str) -> Result<Option<u64>> {
    parse_amount(input).map_err(|_| LoanError::InvalidNumber {
        field,
        value: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> LoanApplicationDraft {
        let mut draft = LoanApplicationDraft::new("7");
        draft.select_loan_type_key("1").unwrap();
        draft.set_property_value("100.000.000").unwrap();
        draft.set_required_loan("80.000.000").unwrap();
        draft.set_years_to_pay("30").unwrap();
        draft.set_income("2.500.000").unwrap();
        draft.set_veteran_years(4.0).unwrap();
        draft.set_total_debt("350000").unwrap();
        draft.set_independent(false).unwrap();
        draft
    }

    #[test]
    fn test_state_progression() {
        let mut draft = LoanApplicationDraft::new("7");
        assert_eq!(draft.state(), DraftState::Empty);

        draft.select_loan_type(LoanType::Remodeling).unwrap();
        assert_eq!(draft.state(), DraftState::LoanTypeSelected);

        draft.set_property_value("40000000").unwrap();
        assert_eq!(draft.state(), DraftState::FieldsEditable);

        assert_eq!(complete_draft().state(), DraftState::ReadyToSubmit);
    }

    #[test]
    fn test_document_is_optional() {
        let draft = complete_draft();
        assert!(draft.document().is_none());
        assert!(draft.to_application().is_ok());
    }

    #[test]
    fn test_missing_fields_listed() {
        let mut draft = complete_draft();
        draft.set_income("").unwrap();
        assert_eq!(draft.state(), DraftState::FieldsEditable);
        match draft.to_application() {
            Err(LoanError::IncompleteApplication { missing }) => assert_eq!(missing, vec!["income"]),
            other => panic!("expected incomplete application, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_contents() {
        let application = complete_draft().to_application().unwrap();
        assert_eq!(application.applicant_id, "7");
        assert_eq!(application.loan_type, LoanType::FirstHome);
        assert_eq!(application.year_interest, 4.5);
        assert_eq!(application.loan_amount, 80_000_000);
        assert_eq!(application.max_duration, 30);
        assert_eq!(application.income, 2_500_000);
        assert_eq!(application.total_debt, 350_000);
        assert!(!application.is_independent);
    }

    #[test]
    fn test_non_pdf_rejected_and_clears_previous() {
        let mut draft = complete_draft();
        draft.attach_document(SupportingDocument::pdf("payslips.pdf", b"%PDF-1.7".to_vec())).unwrap();
        assert_eq!(draft.document().unwrap().file_name, "payslips.pdf");

        let err = draft
            .attach_document(SupportingDocument::new("photo.png", "image/png", vec![0x89]))
            .unwrap_err();
        assert!(matches!(err, LoanError::InvalidDocumentType { .. }));
        assert!(draft.document().is_none());
    }

    #[test]
    fn test_negative_veteran_years_rejected() {
        let mut draft = complete_draft();
        assert!(draft.set_veteran_years(-1.0).is_err());
        assert!(draft.set_veteran_years(f64::INFINITY).is_err());
        assert_eq!(draft.veteran_years(), Some(4.0));
    }

    #[test]
    fn test_submitted_is_terminal() {
        let mut draft = complete_draft();
        draft.mark_submitted();
        assert_eq!(draft.state(), DraftState::Submitted);
        assert!(matches!(draft.set_income("1"), Err(LoanError::DraftSubmitted)));
        assert!(matches!(draft.select_loan_type(LoanType::SecondHome), Err(LoanError::DraftSubmitted)));
        assert!(matches!(draft.to_application(), Err(LoanError::DraftSubmitted)));
    }
}

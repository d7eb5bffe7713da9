//! Loan application drafts and the payloads sent to the loan service

mod terms;
mod draft;
mod payload;

pub use terms::LoanTerms;
pub use draft::{DraftState, LoanApplicationDraft, SupportingDocument, ACCEPTED_DOCUMENT_TYPE};
pub use payload::{LoanApplication, SimulationRequest};

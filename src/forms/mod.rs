//! Form handlers for the two portal screens
//!
//! Each form owns its state and a [`LoanService`](crate::service::LoanService).
//! Input events go through `update`, which records the error text as the
//! user-facing notice when an edit is rejected.

mod apply;
mod simulation;

pub use apply::ApplyForLoanForm;
pub use simulation::SimulationForm;

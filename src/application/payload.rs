//! JSON bodies exchanged with the loan service

use crate::error::Result;
use crate::payment::compute_monthly_payment;
use crate::rules::LoanType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a completed draft, as stored by the loan service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "idUser")]
    pub applicant_id: String,

    #[serde(rename = "type")]
    pub loan_type: LoanType,

    /// Annual rate in percent, fixed by the loan type
    #[serde(rename = "yearInterest")]
    pub year_interest: f64,

    /// Requested term in years
    #[serde(rename = "maxDuration")]
    pub max_duration: u32,

    /// Monthly income
    pub income: u64,

    /// Years at the current job
    pub veteran: f64,

    /// Monthly bills and debt payments
    #[serde(rename = "totaldebt")]
    pub total_debt: u64,

    #[serde(rename = "loanAmount")]
    pub loan_amount: u64,

    #[serde(rename = "isIndependent", with = "bool_as_int")]
    pub is_independent: bool,

    #[serde(rename = "submittedAt", default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

/// Inputs for a monthly payment estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub loan_amount: f64,
    /// Annual rate in percent
    pub year_interest_rate: f64,
    /// Term in years
    pub year_payments: u32,
}

impl SimulationRequest {
    /// Unrounded monthly payment for this request
    pub fn monthly_payment(&self) -> Result<f64> {
        compute_monthly_payment(self.loan_amount, self.year_interest_rate, self.year_payments as i64)
    }
}

/// The service encodes flags as 0/1
mod bool_as_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!("expected 0 or 1, got {}", other))),
        }
    }
}

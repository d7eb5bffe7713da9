//! AWS Lambda HTTP handler for the loan service
//!
//! Routes:
//! - POST /simulate  SimulationRequest -> monthly payment (JSON number)
//! - POST /validate  amount/term check against the loan type table
//! - POST /loans     LoanApplication -> 201
//!
//! Applications accepted on /loans live in the warm instance's memory only.
//! They are lost on a cold start and are not shared between instances.

use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use loan_portal::{
    rules::{max_loan, validate_term, within_loan_cap},
    LoanApplication, LoanError, LoanService, LoanType, LocalLoanService, PortalConfig, SimulationRequest,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    loan_type: String,
    property_value: u64,
    #[serde(default)]
    required_loan: Option<u64>,
    #[serde(default)]
    years_to_pay: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    valid: bool,
    max_loan: f64,
    max_years: u32,
    interest_rate: f64,
    errors: Vec<String>,
}

/// Status code and JSON body for a request
async fn route(service: &LocalLoanService, method: &str, path: &str, body: &[u8]) -> (u16, String) {
    match (method, path) {
        ("POST", "/simulate") => {
            let request: SimulationRequest = match serde_json::from_slice(body) {
                Ok(r) => r,
                Err(e) => return bad_request(format!("Invalid simulation request: {}", e)),
            };
            match service.simulate_payment(&request).await {
                Ok(payment) => (200, json!(payment).to_string()),
                Err(e) => bad_request(e.to_string()),
            }
        }
        ("POST", "/validate") => {
            let request: ValidateRequest = match serde_json::from_slice(body) {
                Ok(r) => r,
                Err(e) => return bad_request(format!("Invalid validation request: {}", e)),
            };
            match validate(&request) {
                Ok(response) => (200, json!(response).to_string()),
                Err(e) => bad_request(e.to_string()),
            }
        }
        ("POST", "/loans") => {
            let application: LoanApplication = match serde_json::from_slice(body) {
                Ok(a) => a,
                Err(e) => return bad_request(format!("Invalid loan application: {}", e)),
            };
            match service.submit_loan_application(&application, None).await {
                Ok(()) => (201, json!({ "status": "created" }).to_string()),
                Err(e) => bad_request(e.to_string()),
            }
        }
        _ => (404, json!({ "error": format!("No route for {} {}", method, path) }).to_string()),
    }
}

fn validate(request: &ValidateRequest) -> loan_portal::Result<ValidateResponse> {
    let loan_type: LoanType = request.loan_type.parse()?;
    let rule = loan_type.rule();
    let property_value = request.property_value as f64;

    let mut errors = Vec::new();
    if let Some(loan) = request.required_loan {
        if !within_loan_cap(request.property_value, loan, loan_type) {
            let e = LoanError::LoanAmountExceedsLimit {
                max_loan: max_loan(property_value, loan_type),
                max_loan_percentage: rule.max_loan_percentage,
            };
            errors.push(e.to_string());
        }
    }
    if let Some(years) = request.years_to_pay {
        if let Err(e) = validate_term(years, loan_type) {
            errors.push(e.to_string());
        }
    }

    Ok(ValidateResponse {
        valid: errors.is_empty(),
        max_loan: max_loan(property_value, loan_type),
        max_years: rule.max_years,
        interest_rate: rule.interest_rate,
        errors,
    })
}

fn bad_request(message: String) -> (u16, String) {
    warn!("Rejected request: {}", message);
    (400, json!({ "error": message }).to_string())
}

async fn handler(service: &LocalLoanService, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str().to_string();
    let path = event.uri().path().to_string();
    let (status, body) = route(service, &method, &path, event.body().as_ref()).await;
    info!("{} {} -> {}", method, path, status);

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // Fail fast on a broken config file
    let config = PortalConfig::load(None).map_err(|e| Error::from(e.to_string()))?;
    info!("Loan service starting (separator {:?})", config.thousands_separator);

    let service = Arc::new(LocalLoanService::new());
    run(service_fn(move |event: Request| {
        let service = Arc::clone(&service);
        async move { handler(&service, event).await }
    }))
    .await
}

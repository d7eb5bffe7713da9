//! Estimate the monthly payment for a mortgage and optionally write the
//! full amortization schedule as CSV
//!
//! Amount and term default to the maximum the loan type allows.

use anyhow::{Context, Result};
use clap::Parser;
use loan_portal::{
    format::{format_amount, format_payment},
    payment::compare_loan_types,
    AmortizationSchedule, LoanTerms, LoanType, PortalConfig,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "simulate_loan", about = "Mortgage payment simulator")]
struct Args {
    /// Loan type key: 1 first home, 2 second home, 3 commercial property, 4 remodeling
    #[arg(short = 't', long, default_value = "1")]
    loan_type: String,

    /// Declared property value (separators allowed, e.g. 100.000.000)
    #[arg(short, long)]
    property_value: String,

    /// Requested loan amount [default: maximum for the loan type]
    #[arg(short, long)]
    amount: Option<String>,

    /// Years to pay [default: maximum for the loan type]
    #[arg(short, long)]
    years: Option<String>,

    /// Write the amortization schedule as CSV
    #[arg(long)]
    schedule: bool,

    /// Schedule output path [default: from config]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also quote every loan type at its maximum amount and term
    #[arg(long)]
    compare: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let args = Args::parse();
    let config = PortalConfig::load(args.config.as_deref())?;
    let sep = config.thousands_separator;

    let loan_type: LoanType = args.loan_type.parse()?;
    let rule = loan_type.rule();

    let mut terms = LoanTerms::new();
    terms.select_loan_type(loan_type);
    terms.set_property_value(&args.property_value)?;

    // Amounts are whole currency units, so the usable cap rounds down
    let max_amount = terms
        .max_loan()
        .context("Property value is required")?
        .floor() as u64;
    let amount = args.amount.clone().unwrap_or_else(|| max_amount.to_string());
    terms.set_required_loan(&amount)?;

    let years = args.years.clone().unwrap_or_else(|| rule.max_years.to_string());
    terms.set_years_to_pay(&years)?;

    let request = terms.simulation_request()?;
    let payment = request.monthly_payment()?;

    println!("{}", loan_type);
    println!(
        "  Property value: {} {}",
        terms.property_value_display(sep),
        config.currency_label
    );
    println!(
        "  Loan amount:    {} {} (max {})",
        terms.required_loan_display(sep),
        config.currency_label,
        format_amount(max_amount, sep)
    );
    println!("  Term:           {} years at {}% annual", request.year_payments, request.year_interest_rate);
    println!("  Monthly payment: {} {}", format_payment(payment, sep), config.currency_label);

    if args.schedule {
        let schedule = AmortizationSchedule::build(
            request.loan_amount,
            request.year_interest_rate,
            request.year_payments as i64,
        )?;
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.schedule_path));
        schedule
            .write_csv(&output)
            .with_context(|| format!("Failed to write schedule to {}", output.display()))?;

        println!("\nSchedule: {} installments written to {}", schedule.rows.len(), output.display());
        println!("  Total paid:     {} {}", format_payment(schedule.total_paid, sep), config.currency_label);
        println!("  Total interest: {} {}", format_payment(schedule.total_interest, sep), config.currency_label);
    }

    if args.compare {
        let property_value = terms.property_value().unwrap_or_default();
        println!("\nAll loan types for a property of {}:", format_amount(property_value, sep));
        println!("{:<22} {:>16} {:>6} {:>6} {:>14}", "Type", "MaxLoan", "Years", "Rate", "Payment");
        for quote in compare_loan_types(property_value as f64)? {
            println!(
                "{:<22} {:>16} {:>6} {:>6} {:>14}",
                quote.loan_type.label(),
                format_amount(quote.max_loan.floor() as u64, sep),
                quote.max_years,
                quote.interest_rate,
                format_payment(quote.monthly_payment, sep)
            );
        }
    }

    log::debug!("Done in {:?}", start.elapsed());
    Ok(())
}

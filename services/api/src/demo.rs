use crate::infra::{build_advisor_service, parse_verbosity};
use chrono::Local;
use clap::Args;
use drivewise::advisor::{
    BuyScenario, CreditScoreBand, DecisionRequest, ExplanationRequest, LeaseEndPlan,
    LeaseScenario, RiskTolerance, UserProfile, Verbosity,
};
use drivewise::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Path to a JSON file holding { "user": ..., "buy": ..., "lease": ... }
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Narrative verbosity for the printed explanation (brief, standard, detailed)
    #[arg(long, default_value = "standard", value_parser = parse_verbosity)]
    pub(crate) verbosity: Verbosity,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Narrative verbosity for the printed explanation (brief, standard, detailed)
    #[arg(long, default_value = "standard", value_parser = parse_verbosity)]
    pub(crate) verbosity: Verbosity,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.request)?;
    let request: DecisionRequest =
        serde_json::from_str(&raw).map_err(|err| AppError::Input(err.to_string()))?;

    let service = build_advisor_service();
    let result = service.decide(&request.user, &request.buy, &request.lease)?;

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|err| AppError::Input(err.to_string()))?;
    println!("{rendered}");

    let explanation = service.explain(&ExplanationRequest {
        result,
        buy: Some(request.buy),
        lease: Some(request.lease),
        verbosity: args.verbosity,
        use_ai: false,
    });
    println!();
    println!("{}", explanation.headline);
    println!("{}", explanation.explanation);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let user = demo_profile();
    let buy = demo_buy_scenario();
    let lease = demo_lease_scenario();

    println!("Buy-vs-lease advisor demo");
    println!("Evaluated {}", Local::now().date_naive());

    let service = build_advisor_service();
    let result = service.decide(&user, &buy, &lease)?;

    println!();
    println!(
        "Verdict: {} ({} confidence)",
        result.verdict.label(),
        result.confidence.label()
    );
    println!("{}", result.summary);

    println!();
    println!(
        "Monthly all-in: buy ${:.2} | lease ${:.2}",
        result.buy_monthly_all_in, result.lease_monthly_all_in
    );
    println!(
        "Total over {} months: buy ${:.2} | lease ${:.2}",
        buy.ownership_months, result.buy_total_cost, result.lease_total_cost
    );
    println!(
        "Stress scores: buy {:.1} | lease {:.1}",
        result.buy_stress_score, result.lease_stress_score
    );

    if result.risk_flags.is_empty() {
        println!("\nRisk flags: none");
    } else {
        println!("\nRisk flags");
        for flag in &result.risk_flags {
            println!("- {flag}");
        }
    }

    let explanation = service.explain(&ExplanationRequest {
        result,
        buy: Some(buy),
        lease: Some(lease),
        verbosity: args.verbosity,
        use_ai: false,
    });
    println!();
    println!("{}", explanation.headline);
    println!("{}", explanation.explanation);

    Ok(())
}

fn demo_profile() -> UserProfile {
    UserProfile {
        monthly_net_income: 6500.0,
        monthly_fixed_expenses: 3800.0,
        current_savings: 12000.0,
        credit_score_band: CreditScoreBand::Good680To739,
        risk_tolerance: RiskTolerance::Medium,
    }
}

fn demo_buy_scenario() -> BuyScenario {
    BuyScenario {
        vehicle_price: 42000.0,
        down_payment: 4200.0,
        apr_percent: 7.5,
        term_months: 72,
        est_monthly_insurance: 180.0,
        est_monthly_maintenance: 75.0,
        ownership_months: 72,
    }
}

fn demo_lease_scenario() -> LeaseScenario {
    LeaseScenario {
        msrp: 42000.0,
        monthly_payment: 550.0,
        due_at_signing: 3000.0,
        term_months: 36,
        mileage_allowance_per_year: 12000.0,
        est_miles_per_year: 12000.0,
        est_excess_mile_fee: 0.25,
        est_monthly_insurance: 180.0,
        est_monthly_maintenance: 40.0,
        lease_end_plan: LeaseEndPlan::Return,
        est_buyout_price: None,
    }
}

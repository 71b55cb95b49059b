use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::advisor::allowlist::NarrativeContext;
use crate::advisor::domain::{
    BuyScenario, CreditScoreBand, DecisionResult, LeaseEndPlan, LeaseScenario, RiskTolerance,
    UserProfile,
};
use crate::advisor::engine::{DecisionEngine, DecisionPolicy};
use crate::advisor::explain::{
    DisabledNarrativeGenerator, NarrativeError, NarrativeGenerator, Verbosity,
};
use crate::advisor::router::advisor_router;
use crate::advisor::service::AdvisorService;

pub(super) fn profile() -> UserProfile {
    UserProfile {
        monthly_net_income: 6500.0,
        monthly_fixed_expenses: 3800.0,
        current_savings: 12000.0,
        credit_score_band: CreditScoreBand::Good680To739,
        risk_tolerance: RiskTolerance::Medium,
    }
}

pub(super) fn buy_scenario() -> BuyScenario {
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

pub(super) fn lease_scenario() -> LeaseScenario {
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

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::default()
}

pub(super) fn sample_result() -> DecisionResult {
    engine()
        .decide(&profile(), &buy_scenario(), &lease_scenario())
        .expect("sample decision succeeds")
}

pub(super) fn narrative_context() -> NarrativeContext {
    NarrativeContext::from_scenarios(Some(&buy_scenario()), Some(&lease_scenario()))
}

pub(super) struct CannedGenerator {
    pub(super) payload: Value,
}

impl NarrativeGenerator for CannedGenerator {
    fn generate(
        &self,
        _result: &DecisionResult,
        _context: &NarrativeContext,
        _verbosity: Verbosity,
    ) -> Result<Value, NarrativeError> {
        Ok(self.payload.clone())
    }
}

pub(super) struct FailingGenerator;

impl NarrativeGenerator for FailingGenerator {
    fn generate(
        &self,
        _result: &DecisionResult,
        _context: &NarrativeContext,
        _verbosity: Verbosity,
    ) -> Result<Value, NarrativeError> {
        Err(NarrativeError::Unavailable("generator offline".to_string()))
    }
}

pub(super) fn service_with_canned_narrative(payload: Value) -> AdvisorService<CannedGenerator> {
    AdvisorService::new(
        DecisionPolicy::default(),
        Some(Arc::new(CannedGenerator { payload })),
    )
}

pub(super) fn service_without_generator() -> AdvisorService<DisabledNarrativeGenerator> {
    AdvisorService::new(DecisionPolicy::default(), None)
}

pub(super) fn router() -> axum::Router {
    advisor_router(Arc::new(service_without_generator()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

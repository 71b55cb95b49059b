//! Integration specifications for the buy-vs-lease decision workflow.
//!
//! Scenarios run through the public engine, service, and HTTP router so we can
//! validate the decision, narrative, and routing behavior without reaching
//! into private modules.

mod common {
    use std::sync::Arc;

    use drivewise::advisor::{
        advisor_router, AdvisorService, BuyScenario, CreditScoreBand, DecisionPolicy,
        DisabledNarrativeGenerator, LeaseEndPlan, LeaseScenario, RiskTolerance, UserProfile,
    };

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

    pub(super) fn build_service() -> AdvisorService<DisabledNarrativeGenerator> {
        AdvisorService::new(DecisionPolicy::default(), None)
    }

    pub(super) fn build_router() -> axum::Router {
        advisor_router(Arc::new(build_service()))
    }
}

mod decision {
    use super::common::*;
    use drivewise::advisor::{Confidence, DecisionError, Verdict};

    #[test]
    fn canonical_profile_leans_lease_on_cost() {
        let service = build_service();
        let result = service
            .decide(&profile(), &buy_scenario(), &lease_scenario())
            .expect("decision succeeds");

        assert_eq!(result.verdict, Verdict::Lease);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.lease_total_cost < result.buy_total_cost);
        assert!(result.risk_flags.len() <= 12);
    }

    #[test]
    fn identical_requests_produce_identical_results() {
        let service = build_service();
        let first = service
            .decide(&profile(), &buy_scenario(), &lease_scenario())
            .expect("first decision");
        let second = service
            .decide(&profile(), &buy_scenario(), &lease_scenario())
            .expect("second decision");

        assert_eq!(first, second);
        let first_json = serde_json::to_string(&first).expect("serialize first");
        let second_json = serde_json::to_string(&second).expect("serialize second");
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn validation_failures_name_the_field() {
        let service = build_service();
        let mut buy = buy_scenario();
        buy.ownership_months = 0;

        match service.decide(&profile(), &buy, &lease_scenario()) {
            Err(DecisionError::NotPositive { field }) => {
                assert_eq!(field, "buy.ownership_months");
            }
            other => panic!("expected ownership validation error, got {other:?}"),
        }
    }
}

mod narrative {
    use super::common::*;
    use drivewise::advisor::{ExplanationRequest, ExplanationSource, Verbosity};

    #[test]
    fn explanation_falls_back_without_a_generator() {
        let service = build_service();
        let result = service
            .decide(&profile(), &buy_scenario(), &lease_scenario())
            .expect("decision succeeds");

        let explanation = service.explain(&ExplanationRequest {
            result,
            buy: Some(buy_scenario()),
            lease: Some(lease_scenario()),
            verbosity: Verbosity::Detailed,
            use_ai: true,
        });

        assert_eq!(explanation.source, ExplanationSource::Deterministic);
        assert!(explanation.explanation.contains("per month"));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn decision_endpoint_round_trips() {
        let router = build_router();
        let body = json!({
            "user": profile(),
            "buy": buy_scenario(),
            "lease": lease_scenario(),
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/advisor/decision")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload.get("verdict").and_then(Value::as_str), Some("lease"));
        assert!(payload.get("summary").and_then(Value::as_str).is_some());
    }

    #[tokio::test]
    async fn invalid_request_maps_to_client_error() {
        let router = build_router();
        let mut lease = lease_scenario();
        lease.lease_end_plan = drivewise::advisor::LeaseEndPlan::Buyout;
        lease.est_buyout_price = None;
        let body = json!({
            "user": profile(),
            "buy": buy_scenario(),
            "lease": lease,
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/advisor/decision")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("est_buyout_price"));
    }
}

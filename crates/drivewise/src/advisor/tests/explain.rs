use serde_json::json;

use super::common::*;
use crate::advisor::allowlist::NumericAllowlist;
use crate::advisor::explain::{
    deterministic_explanation, resolve_candidate, ExplanationRequest, ExplanationSource,
    NarrativeRejection, Verbosity,
};
use crate::advisor::service::AdvisorService;

fn request(use_ai: bool) -> ExplanationRequest {
    ExplanationRequest {
        result: sample_result(),
        buy: Some(buy_scenario()),
        lease: Some(lease_scenario()),
        verbosity: Verbosity::Standard,
        use_ai,
    }
}

fn valid_ai_payload() -> serde_json::Value {
    json!({
        "headline": "Leasing keeps the month calmer",
        "explanation": "Leasing leaves more room in the monthly budget for this profile.",
        "bullets": [
            "Lower all-in monthly cost",
            "No long loan commitment",
            "Signing cost is spread over the lease term"
        ],
        "cautions": ["Mileage is capped, so long commutes change the math"]
    })
}

#[test]
fn deterministic_explanation_passes_its_own_allowlist() {
    let result = sample_result();
    let context = narrative_context();
    let allowlist = NumericAllowlist::from_result(&result, &context);

    for verbosity in [Verbosity::Brief, Verbosity::Standard, Verbosity::Detailed] {
        let explanation = deterministic_explanation(&result, &context, verbosity);
        let text = format!("{} {}", explanation.headline, explanation.explanation);
        assert!(
            allowlist.validate(&text).is_ok(),
            "verbosity {verbosity:?} leaked a number: {text}"
        );
        assert_eq!(explanation.source, ExplanationSource::Deterministic);
    }
}

#[test]
fn verbosity_controls_detail() {
    let result = sample_result();
    let context = narrative_context();

    let brief = deterministic_explanation(&result, &context, Verbosity::Brief);
    let detailed = deterministic_explanation(&result, &context, Verbosity::Detailed);

    assert!(detailed.explanation.len() > brief.explanation.len());
    assert!(detailed.explanation.contains("miles per year"));
    assert!(!brief.explanation.contains("Stress scores"));
}

#[test]
fn valid_ai_candidate_is_served() {
    let service = service_with_canned_narrative(valid_ai_payload());
    let explanation = service.explain(&request(true));

    assert_eq!(explanation.source, ExplanationSource::Ai);
    assert_eq!(explanation.headline, "Leasing keeps the month calmer");
}

#[test]
fn use_ai_false_stays_deterministic() {
    let service = service_with_canned_narrative(valid_ai_payload());
    let explanation = service.explain(&request(false));
    assert_eq!(explanation.source, ExplanationSource::Deterministic);
}

#[test]
fn extra_keys_force_fallback() {
    let mut payload = valid_ai_payload();
    payload["confidence_note"] = json!("very sure");

    let service = service_with_canned_narrative(payload);
    let explanation = service.explain(&request(true));
    assert_eq!(explanation.source, ExplanationSource::Deterministic);
}

#[test]
fn invented_numbers_force_fallback() {
    let mut payload = valid_ai_payload();
    payload["explanation"] = json!("Leasing saves you $120 every month.");

    let service = service_with_canned_narrative(payload);
    let explanation = service.explain(&request(true));
    assert_eq!(explanation.source, ExplanationSource::Deterministic);
}

#[test]
fn bullet_and_caution_cardinality_is_enforced() {
    let mut payload = valid_ai_payload();
    payload["bullets"] = json!(["only", "two"]);
    let service = service_with_canned_narrative(payload);
    assert_eq!(
        service.explain(&request(true)).source,
        ExplanationSource::Deterministic
    );

    let mut payload = valid_ai_payload();
    payload["cautions"] = json!([]);
    let service = service_with_canned_narrative(payload);
    assert_eq!(
        service.explain(&request(true)).source,
        ExplanationSource::Deterministic
    );
}

#[test]
fn generator_failure_falls_back() {
    let service = AdvisorService::new(
        crate::advisor::engine::DecisionPolicy::default(),
        Some(std::sync::Arc::new(FailingGenerator)),
    );
    let explanation = service.explain(&request(true));
    assert_eq!(explanation.source, ExplanationSource::Deterministic);
}

#[test]
fn missing_generator_falls_back() {
    let service = service_without_generator();
    let explanation = service.explain(&request(true));
    assert_eq!(explanation.source, ExplanationSource::Deterministic);
}

#[test]
fn resolve_candidate_reports_offending_tokens() {
    let result = sample_result();
    let allowlist = NumericAllowlist::from_result(&result, &narrative_context());

    let mut payload = valid_ai_payload();
    payload["explanation"] = json!("A fabricated $99 figure.");

    match resolve_candidate(payload, &allowlist) {
        Err(NarrativeRejection::Allowlist(violation)) => {
            assert_eq!(violation.offending_tokens, vec!["99".to_string()]);
        }
        other => panic!("expected allowlist rejection, got {other:?}"),
    }
}

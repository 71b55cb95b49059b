use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use drivewise::advisor::{AdvisorService, DecisionPolicy, DisabledNarrativeGenerator, Verbosity};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Deployment hook for diverging from the library's default policy values.
pub(crate) fn default_decision_policy() -> DecisionPolicy {
    DecisionPolicy::default()
}

pub(crate) fn build_advisor_service() -> AdvisorService<DisabledNarrativeGenerator> {
    AdvisorService::new(default_decision_policy(), None)
}

pub(crate) fn parse_verbosity(raw: &str) -> Result<Verbosity, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "brief" => Ok(Verbosity::Brief),
        "standard" => Ok(Verbosity::Standard),
        "detailed" => Ok(Verbosity::Detailed),
        other => Err(format!(
            "unknown verbosity '{other}' (expected brief, standard, or detailed)"
        )),
    }
}

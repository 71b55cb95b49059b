//! Buy-vs-lease advisory: domain model, decision engine, stress scoring, and
//! the explanation surfaces layered on top of a result.
//!
//! The whole module is pure and synchronous; every call builds fresh values
//! from its inputs, so it is safe to share one engine across request handlers
//! without locking.

pub mod allowlist;
pub mod domain;
pub mod engine;
pub mod explain;
pub mod math;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use allowlist::{AllowlistViolation, NarrativeContext, NumericAllowlist};
pub use domain::{
    BuyScenario, Confidence, CreditScoreBand, DecisionError, DecisionResult, LeaseEndPlan,
    LeaseScenario, RiskTolerance, UserProfile, Verdict,
};
pub use engine::{
    score_monthly_stress, simulate_income_shock, DecisionEngine, DecisionPolicy, StressBreakdown,
    StressInputs, StressLevel, StressThresholds,
};
pub use explain::{
    deterministic_explanation, AiNarrative, DisabledNarrativeGenerator, Explanation,
    ExplanationRequest, ExplanationSource, NarrativeError, NarrativeGenerator, NarrativeRejection,
    NarrativeShapeError, Verbosity,
};
pub use router::{advisor_router, DecisionRequest};
pub use service::AdvisorService;

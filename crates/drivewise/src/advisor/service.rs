use std::sync::Arc;

use super::allowlist::{NarrativeContext, NumericAllowlist};
use super::domain::{BuyScenario, DecisionError, DecisionResult, LeaseScenario, UserProfile};
use super::engine::{DecisionEngine, DecisionPolicy};
use super::explain::{
    deterministic_explanation, resolve_candidate, Explanation, ExplanationRequest,
    ExplanationSource, NarrativeGenerator,
};

/// Service composing the decision engine with an optional narrative generator.
pub struct AdvisorService<G> {
    engine: DecisionEngine,
    generator: Option<Arc<G>>,
}

impl<G> AdvisorService<G>
where
    G: NarrativeGenerator + 'static,
{
    pub fn new(policy: DecisionPolicy, generator: Option<Arc<G>>) -> Self {
        Self {
            engine: DecisionEngine::new(policy),
            generator,
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Evaluate one decision request.
    pub fn decide(
        &self,
        user: &UserProfile,
        buy: &BuyScenario,
        lease: &LeaseScenario,
    ) -> Result<DecisionResult, DecisionError> {
        self.engine.decide(user, buy, lease)
    }

    /// Build the narrative for an existing result. Any failure along the AI
    /// path (disabled, generator error, bad shape, invented numbers) falls
    /// back to the deterministic template.
    pub fn explain(&self, request: &ExplanationRequest) -> Explanation {
        let context =
            NarrativeContext::from_scenarios(request.buy.as_ref(), request.lease.as_ref());

        if request.use_ai {
            if let Some(generator) = &self.generator {
                let allowlist = NumericAllowlist::from_result(&request.result, &context);
                if let Ok(candidate) =
                    generator.generate(&request.result, &context, request.verbosity)
                {
                    if let Ok(narrative) = resolve_candidate(candidate, &allowlist) {
                        return Explanation {
                            headline: narrative.headline,
                            explanation: narrative.explanation,
                            source: ExplanationSource::Ai,
                        };
                    }
                }
            }
        }

        deterministic_explanation(&request.result, &context, request.verbosity)
    }
}

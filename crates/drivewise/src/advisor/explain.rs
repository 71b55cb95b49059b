use serde::{Deserialize, Serialize};

use super::allowlist::{AllowlistViolation, NarrativeContext, NumericAllowlist};
use super::domain::{BuyScenario, DecisionResult, LeaseScenario, Verdict};

/// How much detail the narrative should carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Brief,
    #[default]
    Standard,
    Detailed,
}

/// Where the served narrative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Deterministic,
    Ai,
}

impl ExplanationSource {
    pub const fn label(self) -> &'static str {
        match self {
            ExplanationSource::Deterministic => "deterministic",
            ExplanationSource::Ai => "ai",
        }
    }
}

/// Narrative served to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub headline: String,
    pub explanation: String,
    pub source: ExplanationSource,
}

/// Inputs for the explanation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplanationRequest {
    pub result: DecisionResult,
    #[serde(default)]
    pub buy: Option<BuyScenario>,
    #[serde(default)]
    pub lease: Option<LeaseScenario>,
    #[serde(default)]
    pub verbosity: Verbosity,
    #[serde(default)]
    pub use_ai: bool,
}

/// Candidate narrative from an external generator. The shape is strict:
/// exactly these keys, 3 to 5 bullets, 1 to 3 cautions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiNarrative {
    pub headline: String,
    pub explanation: String,
    pub bullets: Vec<String>,
    pub cautions: Vec<String>,
}

impl AiNarrative {
    pub fn validate_shape(&self) -> Result<(), NarrativeShapeError> {
        if self.bullets.len() < 3 || self.bullets.len() > 5 {
            return Err(NarrativeShapeError::BulletCount(self.bullets.len()));
        }
        if self.cautions.is_empty() || self.cautions.len() > 3 {
            return Err(NarrativeShapeError::CautionCount(self.cautions.len()));
        }
        Ok(())
    }

    fn full_text(&self) -> String {
        let mut parts = vec![self.headline.clone(), self.explanation.clone()];
        parts.extend(self.bullets.iter().cloned());
        parts.extend(self.cautions.iter().cloned());
        parts.join("\n")
    }
}

/// Shape failures for candidate narratives.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeShapeError {
    #[error("narrative payload does not match the expected shape: {0}")]
    Malformed(String),
    #[error("narrative must carry 3 to 5 bullets, found {0}")]
    BulletCount(usize),
    #[error("narrative must carry 1 to 3 cautions, found {0}")]
    CautionCount(usize),
}

/// Why a candidate narrative was rejected in favor of the deterministic one.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeRejection {
    #[error(transparent)]
    Shape(#[from] NarrativeShapeError),
    #[error(transparent)]
    Allowlist(#[from] AllowlistViolation),
}

/// Failure modes of an external narrative generator.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generation is disabled")]
    Disabled,
    #[error("narrative generator unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam for AI-style narration. Returned JSON is untrusted until it
/// passes the shape and allowlist checks.
pub trait NarrativeGenerator: Send + Sync {
    fn generate(
        &self,
        result: &DecisionResult,
        context: &NarrativeContext,
        verbosity: Verbosity,
    ) -> Result<serde_json::Value, NarrativeError>;
}

/// Stand-in generator used when AI narration is not wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrativeGenerator;

impl NarrativeGenerator for DisabledNarrativeGenerator {
    fn generate(
        &self,
        _result: &DecisionResult,
        _context: &NarrativeContext,
        _verbosity: Verbosity,
    ) -> Result<serde_json::Value, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

/// Vet a candidate narrative: strict shape first, then every number it cites
/// must come from the allowlist.
pub fn resolve_candidate(
    candidate: serde_json::Value,
    allowlist: &NumericAllowlist,
) -> Result<AiNarrative, NarrativeRejection> {
    let narrative: AiNarrative = serde_json::from_value(candidate)
        .map_err(|err| NarrativeShapeError::Malformed(err.to_string()))?;
    narrative.validate_shape()?;
    allowlist.validate(&narrative.full_text())?;
    Ok(narrative)
}

/// Template narrative assembled only from numbers the allowlist admits:
/// individual result and context fields, never computed deltas.
pub fn deterministic_explanation(
    result: &DecisionResult,
    context: &NarrativeContext,
    verbosity: Verbosity,
) -> Explanation {
    let (winner, winner_monthly, loser, loser_monthly) = match result.verdict {
        Verdict::Buy => (
            "Buying",
            result.buy_monthly_all_in,
            "leasing",
            result.lease_monthly_all_in,
        ),
        Verdict::Lease => (
            "Leasing",
            result.lease_monthly_all_in,
            "buying",
            result.buy_monthly_all_in,
        ),
    };
    let (winner_total, loser_total) = match result.verdict {
        Verdict::Buy => (result.buy_total_cost, result.lease_total_cost),
        Verdict::Lease => (result.lease_total_cost, result.buy_total_cost),
    };

    let headline = format!("{winner} fits your budget better right now");

    let mut sentences = vec![format!(
        "{winner} comes to about ${winner_monthly:.0} per month all-in, versus ${loser_monthly:.0} for {loser}."
    )];

    if verbosity != Verbosity::Brief {
        let window = match context.ownership_months {
            Some(months) => format!("over your {months}-month window"),
            None => "over the comparison window".to_string(),
        };
        sentences.push(format!(
            "Total cost {window} is ${winner_total:.0} against ${loser_total:.0}."
        ));
        sentences.push(format!(
            "Stress scores land at {:.0} for buying and {:.0} for leasing.",
            result.buy_stress_score, result.lease_stress_score
        ));
    }

    if verbosity == Verbosity::Detailed {
        if let (Some(allowance), Some(estimated)) = (
            context.mileage_allowance_per_year,
            context.est_miles_per_year,
        ) {
            sentences.push(format!(
                "The lease allows {allowance:.0} miles per year against your estimated {estimated:.0}."
            ));
        }
        sentences.push(format!(
            "Confidence in this call is {}.",
            result.confidence.label()
        ));
    }

    Explanation {
        headline,
        explanation: sentences.join(" "),
        source: ExplanationSource::Deterministic,
    }
}

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::domain::{BuyScenario, DecisionResult, LeaseScenario};

/// Signed integer with optional comma grouping and an optional decimal part.
fn numeric_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"-?\d{1,3}(?:,\d{3})+(?:\.\d+)?|-?\d+(?:\.\d+)?")
            .expect("numeric token pattern compiles")
    })
}

/// Scenario fields that may legitimately appear in narrative text alongside
/// the numbers in a result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NarrativeContext {
    pub ownership_months: Option<u32>,
    pub lease_term_months: Option<u32>,
    pub mileage_allowance_per_year: Option<f64>,
    pub est_miles_per_year: Option<f64>,
}

impl NarrativeContext {
    pub fn from_scenarios(buy: Option<&BuyScenario>, lease: Option<&LeaseScenario>) -> Self {
        Self {
            ownership_months: buy.map(|scenario| scenario.ownership_months),
            lease_term_months: lease.map(|scenario| scenario.term_months),
            mileage_allowance_per_year: lease.map(|scenario| scenario.mileage_allowance_per_year),
            est_miles_per_year: lease.map(|scenario| scenario.est_miles_per_year),
        }
    }
}

/// The set of numeric tokens a narrative may legitimately contain.
///
/// Every source value is admitted in four renderings: raw, rounded integer,
/// two-decimal fixed, and zero-decimal fixed. Anything else in a narrative is
/// treated as invented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericAllowlist {
    tokens: BTreeSet<String>,
}

impl NumericAllowlist {
    pub fn from_result(result: &DecisionResult, context: &NarrativeContext) -> Self {
        let mut allowlist = Self::default();
        allowlist.insert_value(result.buy_total_cost);
        allowlist.insert_value(result.lease_total_cost);
        allowlist.insert_value(result.buy_monthly_all_in);
        allowlist.insert_value(result.lease_monthly_all_in);
        allowlist.insert_value(result.buy_stress_score);
        allowlist.insert_value(result.lease_stress_score);

        if let Some(months) = context.ownership_months {
            allowlist.insert_value(f64::from(months));
        }
        if let Some(months) = context.lease_term_months {
            allowlist.insert_value(f64::from(months));
        }
        if let Some(miles) = context.mileage_allowance_per_year {
            allowlist.insert_value(miles);
        }
        if let Some(miles) = context.est_miles_per_year {
            allowlist.insert_value(miles);
        }

        allowlist
    }

    fn insert_value(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.tokens.insert(format!("{value}"));
        self.tokens.insert(format!("{}", value.round() as i64));
        self.tokens.insert(format!("{value:.2}"));
        self.tokens.insert(format!("{value:.0}"));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Check every numeric token in `narrative` against the allowlist.
    ///
    /// Extracted tokens are comma-stripped before lookup. A narrative with no
    /// numbers always passes.
    pub fn validate(&self, narrative: &str) -> Result<(), AllowlistViolation> {
        let mut offending: Vec<String> = Vec::new();
        for token in numeric_token_pattern().find_iter(narrative) {
            let normalized = token.as_str().replace(',', "");
            if !self.tokens.contains(normalized.as_str()) && !offending.contains(&normalized) {
                offending.push(normalized);
            }
        }

        if offending.is_empty() {
            Ok(())
        } else {
            Err(AllowlistViolation {
                offending_tokens: offending,
            })
        }
    }
}

/// Rejection detail for a narrative citing numbers outside the allowlist.
/// Returned as a value; callers fall back rather than treating it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("narrative contains numbers outside the allowlist: {}", .offending_tokens.join(", "))]
pub struct AllowlistViolation {
    pub offending_tokens: Vec<String>,
}

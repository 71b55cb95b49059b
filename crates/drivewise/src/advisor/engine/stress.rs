use serde::{Deserialize, Serialize};

use super::super::domain::{DecisionError, RiskTolerance};
use super::super::math::clamp;
use super::config::DecisionPolicy;

const RATIO_OVERAGE_SATURATION: f64 = 0.10;
const RATIO_OVERAGE_PENALTY: f64 = 15.0;
const BUFFER_DEFICIT_SATURATION: f64 = 500.0;
const BUFFER_DEFICIT_PENALTY: f64 = 5.0;

/// Ratio ceilings and buffer floors keyed by the user's risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressThresholds {
    pub ratio_ceiling_low: f64,
    pub ratio_ceiling_medium: f64,
    pub ratio_ceiling_high: f64,
    pub buffer_floor_strong: f64,
    pub buffer_floor_adequate: f64,
    pub buffer_floor_minimum: f64,
}

impl StressThresholds {
    /// Lower tolerance tightens the ratio ceilings and raises the required buffers.
    pub const fn for_tolerance(tolerance: RiskTolerance) -> Self {
        match tolerance {
            RiskTolerance::Low => Self {
                ratio_ceiling_low: 0.10,
                ratio_ceiling_medium: 0.15,
                ratio_ceiling_high: 0.20,
                buffer_floor_strong: 1200.0,
                buffer_floor_adequate: 600.0,
                buffer_floor_minimum: 0.0,
            },
            RiskTolerance::Medium => Self {
                ratio_ceiling_low: 0.12,
                ratio_ceiling_medium: 0.18,
                ratio_ceiling_high: 0.23,
                buffer_floor_strong: 1000.0,
                buffer_floor_adequate: 450.0,
                buffer_floor_minimum: 0.0,
            },
            RiskTolerance::High => Self {
                ratio_ceiling_low: 0.15,
                ratio_ceiling_medium: 0.20,
                ratio_ceiling_high: 0.25,
                buffer_floor_strong: 800.0,
                buffer_floor_adequate: 300.0,
                buffer_floor_minimum: 0.0,
            },
        }
    }
}

/// Qualitative reading of a composite stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub const fn label(self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }

    fn from_score(score: f64) -> Self {
        if score < 40.0 {
            StressLevel::Low
        } else if score < 70.0 {
            StressLevel::Medium
        } else {
            StressLevel::High
        }
    }
}

/// Scoring detail for one scenario; stays within the scorer/engine boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressBreakdown {
    pub car_to_income_ratio: f64,
    pub post_car_buffer: f64,
    pub stress_score: f64,
    pub stress_level: StressLevel,
    pub flags: Vec<String>,
}

/// Inputs for one stress evaluation of a single scenario.
#[derive(Debug, Clone, Copy)]
pub struct StressInputs {
    pub monthly_net_income: f64,
    pub monthly_fixed_expenses: f64,
    pub monthly_car_all_in: f64,
    pub risk_tolerance: RiskTolerance,
}

pub(crate) fn score_from_ratio(ratio: f64, thresholds: &StressThresholds) -> (f64, Vec<String>) {
    let mut flags = Vec::new();
    let mut score = if ratio <= thresholds.ratio_ceiling_low {
        15.0
    } else if ratio <= thresholds.ratio_ceiling_medium {
        flags.push("Car costs are a meaningful portion of income".to_string());
        40.0
    } else if ratio <= thresholds.ratio_ceiling_high {
        flags.push("Car costs are high relative to income".to_string());
        65.0
    } else {
        flags.push("Car costs are very high relative to income".to_string());
        85.0
    };

    if ratio > thresholds.ratio_ceiling_high {
        let overage = ratio - thresholds.ratio_ceiling_high;
        score += (overage / RATIO_OVERAGE_SATURATION).min(1.0) * RATIO_OVERAGE_PENALTY;
    }

    (clamp(score, 0.0, 100.0), flags)
}

pub(crate) fn score_from_buffer(buffer: f64, thresholds: &StressThresholds) -> (f64, Vec<String>) {
    let mut flags = Vec::new();
    let mut score = if buffer >= thresholds.buffer_floor_strong {
        15.0
    } else if buffer >= thresholds.buffer_floor_adequate {
        flags.push("Monthly budget is getting tight after car costs".to_string());
        40.0
    } else if buffer >= thresholds.buffer_floor_minimum {
        flags.push("Very little buffer is left after fixed expenses and car costs".to_string());
        70.0
    } else {
        flags.push("Negative monthly cash flow after car costs".to_string());
        95.0
    };

    if buffer < 0.0 {
        score += (-buffer / BUFFER_DEFICIT_SATURATION).min(1.0) * BUFFER_DEFICIT_PENALTY;
    }

    (clamp(score, 0.0, 100.0), flags)
}

/// Quantify how stressful a monthly car cost is for the given income profile.
///
/// The buffer carries the larger weight: running out of monthly cash is the
/// binding constraint, not the headline ratio.
pub fn score_monthly_stress(
    inputs: &StressInputs,
    policy: &DecisionPolicy,
) -> Result<StressBreakdown, DecisionError> {
    if !inputs.monthly_net_income.is_finite() {
        return Err(DecisionError::NonFinite {
            field: "monthly_net_income",
        });
    }
    if inputs.monthly_net_income <= 0.0 {
        return Err(DecisionError::NotPositive {
            field: "monthly_net_income",
        });
    }
    if !inputs.monthly_fixed_expenses.is_finite() {
        return Err(DecisionError::NonFinite {
            field: "monthly_fixed_expenses",
        });
    }
    if inputs.monthly_fixed_expenses < 0.0 {
        return Err(DecisionError::Negative {
            field: "monthly_fixed_expenses",
        });
    }
    if !inputs.monthly_car_all_in.is_finite() {
        return Err(DecisionError::NonFinite {
            field: "monthly_car_all_in",
        });
    }
    if inputs.monthly_car_all_in < 0.0 {
        return Err(DecisionError::Negative {
            field: "monthly_car_all_in",
        });
    }

    let thresholds = StressThresholds::for_tolerance(inputs.risk_tolerance);
    let car_to_income_ratio = inputs.monthly_car_all_in / inputs.monthly_net_income;
    let post_car_buffer =
        inputs.monthly_net_income - inputs.monthly_fixed_expenses - inputs.monthly_car_all_in;

    let (ratio_score, ratio_flags) = score_from_ratio(car_to_income_ratio, &thresholds);
    let (buffer_score, buffer_flags) = score_from_buffer(post_car_buffer, &thresholds);

    let stress_score = clamp(
        ratio_score * policy.ratio_weight + buffer_score * policy.buffer_weight,
        0.0,
        100.0,
    );

    let mut flags: Vec<String> = Vec::new();
    flags.extend(ratio_flags);
    flags.extend(buffer_flags);
    if car_to_income_ratio >= policy.ratio_alert_threshold {
        flags.push(format!(
            "Car cost exceeds {:.0}% of take-home pay",
            policy.ratio_alert_threshold * 100.0
        ));
    }
    if post_car_buffer < 0.0 {
        // Overlaps the piecewise flag in meaning but not in wording; dedup is
        // by exact string, so both survive.
        flags.push("Negative monthly cash flow".to_string());
    }

    Ok(StressBreakdown {
        car_to_income_ratio,
        post_car_buffer,
        stress_score,
        stress_level: StressLevel::from_score(stress_score),
        flags: dedupe_exact(flags),
    })
}

/// Rescore with income reduced by `income_drop_percent` to probe fragility.
pub fn simulate_income_shock(
    inputs: &StressInputs,
    income_drop_percent: f64,
    policy: &DecisionPolicy,
) -> Result<StressBreakdown, DecisionError> {
    if !income_drop_percent.is_finite()
        || income_drop_percent < 0.0
        || income_drop_percent > policy.max_income_drop_percent
    {
        return Err(DecisionError::IncomeDropOutOfRange {
            value: income_drop_percent,
            max: policy.max_income_drop_percent,
        });
    }

    let shocked = StressInputs {
        monthly_net_income: inputs.monthly_net_income * (1.0 - income_drop_percent / 100.0),
        ..*inputs
    };
    score_monthly_stress(&shocked, policy)
}

fn dedupe_exact(flags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut deduped = Vec::new();
    for flag in flags {
        if seen.insert(flag.clone()) {
            deduped.push(flag);
        }
    }
    deduped
}

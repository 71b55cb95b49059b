use serde::{Deserialize, Serialize};

/// Policy dials backing stress weighting, verdict cutoffs, and output bounds.
///
/// The defaults carry the canonical business values; construct a custom policy
/// to tune any of them without touching engine logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPolicy {
    /// Weight of the cost-to-income ratio in the composite stress score.
    pub ratio_weight: f64,
    /// Weight of the post-car cash buffer in the composite stress score.
    pub buffer_weight: f64,
    /// Ratio at which the take-home-pay warning flag is raised.
    pub ratio_alert_threshold: f64,
    /// Income drop applied when probing fragility, in percent.
    pub income_shock_percent: f64,
    /// Largest income drop `simulate_income_shock` accepts, in percent.
    pub max_income_drop_percent: f64,
    /// Stress-score gap at which the verdict is decided by stress alone.
    pub verdict_stress_gap: f64,
    /// Gap (baseline or shocked) that upgrades confidence to high.
    pub high_confidence_gap: f64,
    /// Months of fixed expenses that should survive the upfront payment.
    pub savings_buffer_floor_months: f64,
    /// Hard cap on the emitted risk-flag list.
    pub max_risk_flags: usize,
    /// Ceiling applied to every money field in the result.
    pub max_reportable_money: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            ratio_weight: 0.45,
            buffer_weight: 0.55,
            ratio_alert_threshold: 0.25,
            income_shock_percent: 10.0,
            max_income_drop_percent: 80.0,
            verdict_stress_gap: 8.0,
            high_confidence_gap: 15.0,
            savings_buffer_floor_months: 2.0,
            max_risk_flags: 12,
            max_reportable_money: 9_007_199_254_740_991.0,
        }
    }
}

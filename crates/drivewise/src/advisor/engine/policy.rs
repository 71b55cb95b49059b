use super::super::domain::{Confidence, Verdict};
use super::config::DecisionPolicy;
use super::stress::StressBreakdown;

/// Pre-computed signals the verdict and confidence rules consume.
pub(crate) struct VerdictSignals<'a> {
    pub buy_stress: &'a StressBreakdown,
    pub lease_stress: &'a StressBreakdown,
    pub buy_shocked: &'a StressBreakdown,
    pub lease_shocked: &'a StressBreakdown,
    pub buy_total_cost: f64,
    pub lease_total_cost: f64,
}

impl VerdictSignals<'_> {
    pub(crate) fn stress_gap(&self) -> f64 {
        self.buy_stress.stress_score - self.lease_stress.stress_score
    }

    pub(crate) fn shock_gap(&self) -> f64 {
        self.buy_shocked.stress_score - self.lease_shocked.stress_score
    }
}

/// Pick the lower-stress side when the gap is decisive, else the cheaper one.
/// Ties on cost go to buying.
pub(crate) fn decide_verdict(signals: &VerdictSignals<'_>, policy: &DecisionPolicy) -> Verdict {
    let stress_gap = signals.stress_gap();
    if stress_gap.abs() >= policy.verdict_stress_gap {
        if stress_gap < 0.0 {
            Verdict::Buy
        } else {
            Verdict::Lease
        }
    } else if signals.buy_total_cost <= signals.lease_total_cost {
        Verdict::Buy
    } else {
        Verdict::Lease
    }
}

pub(crate) fn decide_confidence(
    signals: &VerdictSignals<'_>,
    policy: &DecisionPolicy,
) -> Confidence {
    let stress_gap = signals.stress_gap().abs();
    let shock_gap = signals.shock_gap().abs();
    let buy_negative = has_negative_cash_flow(signals.buy_shocked);
    let lease_negative = has_negative_cash_flow(signals.lease_shocked);

    if stress_gap >= policy.high_confidence_gap
        || shock_gap >= policy.high_confidence_gap
        || buy_negative != lease_negative
    {
        Confidence::High
    } else if stress_gap >= policy.verdict_stress_gap || shock_gap >= policy.verdict_stress_gap {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub(crate) fn has_negative_cash_flow(breakdown: &StressBreakdown) -> bool {
    breakdown
        .flags
        .iter()
        .any(|flag| flag.to_lowercase().contains("negative monthly cash flow"))
}

pub(crate) fn build_summary(
    verdict: Verdict,
    signals: &VerdictSignals<'_>,
    policy: &DecisionPolicy,
) -> String {
    let subject = match verdict {
        Verdict::Buy => "Buying",
        Verdict::Lease => "Leasing",
    };
    let stress_gap = signals.stress_gap().abs();

    let first = format!("{subject} is safer based on cash-flow stress for your profile.");
    let second = if stress_gap >= policy.verdict_stress_gap {
        format!("The stress difference is {stress_gap:.0} points.")
    } else {
        let cheaper = if signals.buy_total_cost <= signals.lease_total_cost {
            "buying"
        } else {
            "leasing"
        };
        format!("Stress is close for both, and {cheaper} comes out cheaper over the comparison window.")
    };

    format!("{first} {second}")
}

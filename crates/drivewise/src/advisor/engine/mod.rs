mod config;
mod policy;
mod stress;

pub use config::DecisionPolicy;
pub use stress::{
    score_monthly_stress, simulate_income_shock, StressBreakdown, StressInputs, StressLevel,
    StressThresholds,
};

use std::collections::HashSet;

use super::domain::{
    BuyScenario, DecisionError, DecisionResult, LeaseEndPlan, LeaseScenario, UserProfile,
};
use super::math::{clamp, monthly_payment_from_loan};
use policy::{build_summary, decide_confidence, decide_verdict, VerdictSignals};

/// Stateless engine that applies the decision policy to a profile and two
/// fully-specified scenarios.
pub struct DecisionEngine {
    policy: DecisionPolicy,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DecisionPolicy::default())
    }
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Validate inputs, cost both scenarios over the ownership horizon, score
    /// baseline and shocked stress, and assemble the recommendation.
    pub fn decide(
        &self,
        user: &UserProfile,
        buy: &BuyScenario,
        lease: &LeaseScenario,
    ) -> Result<DecisionResult, DecisionError> {
        validate_user(user)?;
        validate_buy(buy)?;
        validate_lease(lease)?;

        let horizon_months = buy.ownership_months;
        let buy_costs = buy_costs(buy, horizon_months)?;
        let lease_costs = lease_costs(lease, horizon_months);

        let buy_inputs = StressInputs {
            monthly_net_income: user.monthly_net_income,
            monthly_fixed_expenses: user.monthly_fixed_expenses,
            monthly_car_all_in: buy_costs.monthly_all_in,
            risk_tolerance: user.risk_tolerance,
        };
        let lease_inputs = StressInputs {
            monthly_car_all_in: lease_costs.monthly_all_in,
            ..buy_inputs
        };

        let buy_stress = score_monthly_stress(&buy_inputs, &self.policy)?;
        let lease_stress = score_monthly_stress(&lease_inputs, &self.policy)?;
        let buy_shocked =
            simulate_income_shock(&buy_inputs, self.policy.income_shock_percent, &self.policy)?;
        let lease_shocked =
            simulate_income_shock(&lease_inputs, self.policy.income_shock_percent, &self.policy)?;

        let signals = VerdictSignals {
            buy_stress: &buy_stress,
            lease_stress: &lease_stress,
            buy_shocked: &buy_shocked,
            lease_shocked: &lease_shocked,
            buy_total_cost: buy_costs.total,
            lease_total_cost: lease_costs.total,
        };

        let verdict = decide_verdict(&signals, &self.policy);
        let confidence = decide_confidence(&signals, &self.policy);
        let summary = build_summary(verdict, &signals, &self.policy);
        let risk_flags = self.collect_risk_flags(user, buy, lease, &signals);

        let money_max = self.policy.max_reportable_money;
        Ok(DecisionResult {
            verdict,
            confidence,
            summary,
            buy_total_cost: clamp(buy_costs.total, 0.0, money_max),
            lease_total_cost: clamp(lease_costs.total, 0.0, money_max),
            buy_monthly_all_in: clamp(buy_costs.monthly_all_in, 0.0, money_max),
            lease_monthly_all_in: clamp(lease_costs.monthly_all_in, 0.0, money_max),
            buy_stress_score: clamp(buy_stress.stress_score, 0.0, 100.0),
            lease_stress_score: clamp(lease_stress.stress_score, 0.0, 100.0),
            risk_flags,
        })
    }

    fn collect_risk_flags(
        &self,
        user: &UserProfile,
        buy: &BuyScenario,
        lease: &LeaseScenario,
        signals: &VerdictSignals<'_>,
    ) -> Vec<String> {
        let mut flags = Vec::new();
        for flag in &signals.buy_stress.flags {
            flags.push(format!("Buy: {flag}"));
        }
        for flag in &signals.lease_stress.flags {
            flags.push(format!("Lease: {flag}"));
        }
        flags.extend(savings_flags(user, buy, lease, &self.policy));

        let shock_gap = signals.shock_gap();
        if shock_gap.abs() >= self.policy.verdict_stress_gap {
            let favored = if shock_gap < 0.0 { "buying" } else { "leasing" };
            flags.push(format!(
                "Under a {:.0}% income drop, {favored} holds up better by {:.0} points",
                self.policy.income_shock_percent,
                shock_gap.abs()
            ));
        }

        dedupe_and_cap(flags, self.policy.max_risk_flags)
    }
}

struct ScenarioCosts {
    monthly_all_in: f64,
    total: f64,
}

fn buy_costs(buy: &BuyScenario, horizon_months: u32) -> Result<ScenarioCosts, DecisionError> {
    let principal = (buy.vehicle_price - buy.down_payment).max(0.0);
    let monthly_payment = monthly_payment_from_loan(principal, buy.apr_percent, buy.term_months)?;
    let recurring = buy.est_monthly_insurance + buy.est_monthly_maintenance;
    let horizon = f64::from(horizon_months);

    // The loan payment stays in the sum even when the horizon outlives the
    // loan term.
    let total = buy.down_payment + monthly_payment * horizon + recurring * horizon;

    Ok(ScenarioCosts {
        monthly_all_in: monthly_payment + recurring,
        total,
    })
}

fn lease_costs(lease: &LeaseScenario, horizon_months: u32) -> ScenarioCosts {
    let horizon = f64::from(horizon_months);
    let excess_miles_per_month =
        (lease.est_miles_per_year / 12.0 - lease.mileage_allowance_per_year / 12.0).max(0.0);
    let excess_mileage_cost_total = excess_miles_per_month * horizon * lease.est_excess_mile_fee;
    let excess_mileage_cost_monthly = excess_mileage_cost_total / horizon;

    // Amortized over the lease's own term so short horizons still feel the
    // signing cost.
    let due_at_signing_monthly = lease.due_at_signing / f64::from(lease.term_months);
    let recurring = lease.est_monthly_insurance + lease.est_monthly_maintenance;

    let buyout = match lease.lease_end_plan {
        LeaseEndPlan::Buyout if horizon_months >= lease.term_months => {
            lease.est_buyout_price.unwrap_or(0.0)
        }
        _ => 0.0,
    };

    let total = lease.due_at_signing
        + lease.monthly_payment * horizon
        + recurring * horizon
        + excess_mileage_cost_total
        + buyout;

    ScenarioCosts {
        monthly_all_in: lease.monthly_payment
            + due_at_signing_monthly
            + recurring
            + excess_mileage_cost_monthly,
        total,
    }
}

fn savings_flags(
    user: &UserProfile,
    buy: &BuyScenario,
    lease: &LeaseScenario,
    policy: &DecisionPolicy,
) -> Vec<String> {
    let mut flags = Vec::new();
    let buffer_months = |remaining: f64| {
        if user.monthly_fixed_expenses == 0.0 {
            f64::INFINITY
        } else {
            remaining / user.monthly_fixed_expenses
        }
    };

    let buy_remaining = user.current_savings - buy.down_payment;
    if buy_remaining < 0.0 {
        flags.push("The buy scenario's down payment exceeds your current savings".to_string());
    } else if buffer_months(buy_remaining) < policy.savings_buffer_floor_months {
        flags.push(format!(
            "Less than {:.0} months of fixed expenses would remain in savings after the down payment",
            policy.savings_buffer_floor_months
        ));
    }

    let lease_remaining = user.current_savings - lease.due_at_signing;
    if lease_remaining < 0.0 {
        flags.push("The lease scenario's due-at-signing exceeds your current savings".to_string());
    } else if buffer_months(lease_remaining) < policy.savings_buffer_floor_months {
        flags.push(format!(
            "Less than {:.0} months of fixed expenses would remain in savings after lease signing",
            policy.savings_buffer_floor_months
        ));
    }

    flags
}

fn dedupe_and_cap(flags: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for flag in flags {
        if seen.insert(flag.clone()) {
            deduped.push(flag);
            if deduped.len() == cap {
                break;
            }
        }
    }
    deduped
}

fn require_finite(field: &'static str, value: f64) -> Result<f64, DecisionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DecisionError::NonFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, DecisionError> {
    if require_finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(DecisionError::NotPositive { field })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<f64, DecisionError> {
    if require_finite(field, value)? < 0.0 {
        Err(DecisionError::Negative { field })
    } else {
        Ok(value)
    }
}

fn require_positive_months(field: &'static str, value: u32) -> Result<u32, DecisionError> {
    if value == 0 {
        Err(DecisionError::NotPositive { field })
    } else {
        Ok(value)
    }
}

fn validate_user(user: &UserProfile) -> Result<(), DecisionError> {
    require_positive("user.monthly_net_income", user.monthly_net_income)?;
    require_non_negative("user.monthly_fixed_expenses", user.monthly_fixed_expenses)?;
    require_non_negative("user.current_savings", user.current_savings)?;
    Ok(())
}

fn validate_buy(buy: &BuyScenario) -> Result<(), DecisionError> {
    require_positive("buy.vehicle_price", buy.vehicle_price)?;
    require_non_negative("buy.down_payment", buy.down_payment)?;
    if buy.down_payment > buy.vehicle_price {
        return Err(DecisionError::DownPaymentExceedsPrice {
            down_payment: buy.down_payment,
            vehicle_price: buy.vehicle_price,
        });
    }
    require_non_negative("buy.apr_percent", buy.apr_percent)?;
    require_positive_months("buy.term_months", buy.term_months)?;
    require_non_negative("buy.est_monthly_insurance", buy.est_monthly_insurance)?;
    require_non_negative("buy.est_monthly_maintenance", buy.est_monthly_maintenance)?;
    require_positive_months("buy.ownership_months", buy.ownership_months)?;
    Ok(())
}

fn validate_lease(lease: &LeaseScenario) -> Result<(), DecisionError> {
    require_positive("lease.msrp", lease.msrp)?;
    require_non_negative("lease.monthly_payment", lease.monthly_payment)?;
    require_non_negative("lease.due_at_signing", lease.due_at_signing)?;
    require_positive_months("lease.term_months", lease.term_months)?;
    require_positive(
        "lease.mileage_allowance_per_year",
        lease.mileage_allowance_per_year,
    )?;
    require_positive("lease.est_miles_per_year", lease.est_miles_per_year)?;
    require_non_negative("lease.est_excess_mile_fee", lease.est_excess_mile_fee)?;
    require_non_negative("lease.est_monthly_insurance", lease.est_monthly_insurance)?;
    require_non_negative(
        "lease.est_monthly_maintenance",
        lease.est_monthly_maintenance,
    )?;
    if lease.lease_end_plan == LeaseEndPlan::Buyout {
        match lease.est_buyout_price {
            Some(price) if price.is_finite() && price > 0.0 => {}
            _ => return Err(DecisionError::MissingBuyoutPrice),
        }
    }
    Ok(())
}

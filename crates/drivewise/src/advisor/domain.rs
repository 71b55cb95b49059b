use serde::{Deserialize, Serialize};

/// Financial profile supplied once per decision request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub monthly_net_income: f64,
    pub monthly_fixed_expenses: f64,
    pub current_savings: f64,
    /// Carried through for future APR lookup; the engine's arithmetic ignores it.
    pub credit_score_band: CreditScoreBand,
    pub risk_tolerance: RiskTolerance,
}

/// Coarse credit bands as collected by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditScoreBand {
    #[serde(rename = "below_620")]
    Below620,
    #[serde(rename = "620_679")]
    Fair620To679,
    #[serde(rename = "680_739")]
    Good680To739,
    #[serde(rename = "740_plus")]
    Excellent740Plus,
}

/// Selects the stress-scoring threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Financing scenario under consideration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyScenario {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub apr_percent: f64,
    pub term_months: u32,
    pub est_monthly_insurance: f64,
    pub est_monthly_maintenance: f64,
    /// How long the buyer intends to keep the vehicle; sets the comparison horizon.
    pub ownership_months: u32,
}

/// Leasing scenario under consideration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseScenario {
    pub msrp: f64,
    pub monthly_payment: f64,
    pub due_at_signing: f64,
    pub term_months: u32,
    pub mileage_allowance_per_year: f64,
    pub est_miles_per_year: f64,
    pub est_excess_mile_fee: f64,
    pub est_monthly_insurance: f64,
    pub est_monthly_maintenance: f64,
    pub lease_end_plan: LeaseEndPlan,
    /// Required (and positive) when `lease_end_plan` is `buyout`.
    #[serde(default)]
    pub est_buyout_price: Option<f64>,
}

/// What the lessee intends to do when the lease term ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseEndPlan {
    Return,
    Buyout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Buy,
    Lease,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Buy => "buy",
            Verdict::Lease => "lease",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// Immutable snapshot of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub summary: String,
    pub buy_total_cost: f64,
    pub lease_total_cost: f64,
    pub buy_monthly_all_in: f64,
    pub lease_monthly_all_in: f64,
    pub buy_stress_score: f64,
    pub lease_stress_score: f64,
    pub risk_flags: Vec<String>,
}

/// Field-level validation failures raised before any computation happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("buy.down_payment ({down_payment}) must not exceed buy.vehicle_price ({vehicle_price})")]
    DownPaymentExceedsPrice { down_payment: f64, vehicle_price: f64 },
    #[error("lease.est_buyout_price must be present and greater than zero when lease_end_plan is buyout")]
    MissingBuyoutPrice,
    #[error("income_drop_percent must be between 0 and {max}, got {value}")]
    IncomeDropOutOfRange { value: f64, max: f64 },
}

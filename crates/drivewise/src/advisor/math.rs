use super::domain::DecisionError;

/// Clamp `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Fixed monthly payment for an amortized loan.
///
/// Returns 0 when no loan is needed (`principal <= 0`) and falls back to a
/// straight-line split when the periodic rate is zero.
pub fn monthly_payment_from_loan(
    principal: f64,
    apr_percent: f64,
    term_months: u32,
) -> Result<f64, DecisionError> {
    if !principal.is_finite() {
        return Err(DecisionError::NonFinite { field: "principal" });
    }
    if !apr_percent.is_finite() {
        return Err(DecisionError::NonFinite {
            field: "apr_percent",
        });
    }
    if term_months == 0 {
        return Err(DecisionError::NotPositive {
            field: "term_months",
        });
    }
    if principal <= 0.0 {
        return Ok(0.0);
    }

    let monthly_rate = apr_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return Ok(principal / f64::from(term_months));
    }

    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    Ok(principal * monthly_rate * growth / (growth - 1.0))
}

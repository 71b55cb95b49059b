use crate::advisor::domain::DecisionError;
use crate::advisor::math::{clamp, monthly_payment_from_loan};

#[test]
fn clamp_bounds_value() {
    assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
    assert_eq!(clamp(-3.0, 0.0, 100.0), 0.0);
    assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
}

#[test]
fn zero_apr_splits_principal_evenly() {
    let payment = monthly_payment_from_loan(20000.0, 0.0, 50).expect("payment");
    assert!((payment - 400.0).abs() < 1e-9);
}

#[test]
fn zero_principal_needs_no_loan() {
    let payment = monthly_payment_from_loan(0.0, 6.0, 60).expect("payment");
    assert_eq!(payment, 0.0);
    let payment = monthly_payment_from_loan(-500.0, 6.0, 60).expect("payment");
    assert_eq!(payment, 0.0);
}

#[test]
fn amortizes_standard_loan() {
    let payment = monthly_payment_from_loan(20000.0, 6.0, 60).expect("payment");
    assert!((payment - 386.66).abs() < 0.01);
}

#[test]
fn rejects_zero_term() {
    match monthly_payment_from_loan(20000.0, 6.0, 0) {
        Err(DecisionError::NotPositive { field }) => assert_eq!(field, "term_months"),
        other => panic!("expected invalid term error, got {other:?}"),
    }
}

#[test]
fn rejects_non_finite_inputs() {
    assert!(monthly_payment_from_loan(f64::NAN, 6.0, 60).is_err());
    assert!(monthly_payment_from_loan(20000.0, f64::INFINITY, 60).is_err());
}

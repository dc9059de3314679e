use super::{calculate, FlatError};

#[test]
fn evaluates_demo_expressions() {
    assert_eq!(calculate("2 + 3"), Ok(5));
    assert_eq!(calculate("3 * 2 + 1"), Ok(7));
    assert_eq!(calculate("3 * -2 + 6"), Ok(0));
}

#[test]
fn multiplication_and_division_fold_first() {
    assert_eq!(calculate("1 + 2 * 3 - 8 / 4"), Ok(5));
    assert_eq!(calculate("10 - 2 - 3"), Ok(5));
    assert_eq!(calculate("7 / 2 * 2"), Ok(6));
    assert_eq!(calculate("-7 / 2"), Ok(-3));
}

#[test]
fn single_number_is_its_own_value() {
    assert_eq!(calculate("  -42  "), Ok(-42));
}

#[test]
fn reports_malformed_input() {
    assert_eq!(calculate("   "), Err(FlatError::Empty));
    assert_eq!(calculate("2 +"), Err(FlatError::MissingOperand("+".to_string())));
    assert_eq!(calculate("2 % 3"), Err(FlatError::UnknownOperator("%".to_string())));
    assert_eq!(calculate("2 + x"), Err(FlatError::InvalidNumber("x".to_string())));
    // Tokens must be separated by whitespace.
    assert_eq!(calculate("2+3"), Err(FlatError::InvalidNumber("2+3".to_string())));
    assert_eq!(calculate("(1 + 2)"), Err(FlatError::InvalidNumber("(1".to_string())));
}

#[test]
fn reports_arithmetic_faults() {
    assert_eq!(calculate("5 / 0"), Err(FlatError::DivisionByZero));
    assert_eq!(calculate("2147483647 + 1"), Err(FlatError::Overflow));
    assert_eq!(calculate("2147483647 * 2"), Err(FlatError::Overflow));
    assert_eq!(calculate("-2147483648 / -1"), Err(FlatError::Overflow));
}

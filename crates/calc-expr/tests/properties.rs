//! Property-based tests for the calculation pipeline.

use calc_expr::{calculate, Calculator, ErrorKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Expr {
    Lit(u16),
    Neg(Box<Expr>),
    Bin(Box<Expr>, char, Box<Expr>),
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![(0u16..1000).prop_map(Expr::Lit), Just(Expr::Lit(0)),];
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|expr| Expr::Neg(Box::new(expr))),
            (
                inner.clone(),
                prop::sample::select(vec!['+', '-', '*', '/']),
                inner
            )
                .prop_map(|(left, op, right)| Expr::Bin(Box::new(left), op, Box::new(right))),
        ]
    })
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Lit(value) => value.to_string(),
        Expr::Neg(inner) => format!("-{}", render(inner)),
        Expr::Bin(left, op, right) => format!("({} {op} {})", render(left), render(right)),
    }
}

/// Reference semantics: exact `i64` arithmetic, `None` on any value that
/// leaves the `i32` range or on division by zero.
fn reference(expr: &Expr) -> Option<i32> {
    let value = match expr {
        Expr::Lit(value) => i64::from(*value),
        Expr::Neg(inner) => -i64::from(reference(inner)?),
        Expr::Bin(left, op, right) => {
            let left = i64::from(reference(left)?);
            let right = i64::from(reference(right)?);
            match op {
                '+' => left + right,
                '-' => left - right,
                '*' => left * right,
                _ => {
                    if right == 0 {
                        return None;
                    }
                    left / right
                }
            }
        }
    };
    i32::try_from(value).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn agrees_with_wide_reference(expr in arb_expr()) {
        let input = render(&expr);
        match reference(&expr) {
            Some(expected) => prop_assert_eq!(calculate(&input), Ok(expected)),
            None => {
                let error = calculate(&input).expect_err("fault expected");
                prop_assert_eq!(error.kind(), ErrorKind::Validation);
            }
        }
    }

    #[test]
    fn repeated_calculation_is_stable(expr in arb_expr()) {
        let input = render(&expr);
        let mut calculator = Calculator::new();
        let first = calculate(&input);
        prop_assert_eq!(&first, &calculate(&input));
        prop_assert_eq!(&first, &calculator.calculate(&input));
        prop_assert_eq!(&first, &calculator.calculate(&input));
    }

    #[test]
    fn whitespace_does_not_matter(expr in arb_expr()) {
        let spaced = render(&expr);
        let compact = spaced.replace(' ', "");
        let tabbed = spaced.replace(' ', " \t ");
        prop_assert_eq!(calculate(&spaced), calculate(&compact));
        prop_assert_eq!(calculate(&spaced), calculate(&tabbed));
    }

    #[test]
    fn division_truncates_toward_zero(a in -100_000i32..100_000, b in -1_000i32..1_000) {
        prop_assume!(b != 0);
        prop_assert_eq!(calculate(&format!("({a}) / ({b})")), Ok(a / b));
    }

    #[test]
    fn garbage_characters_are_invalid(prefix in 0u16..1000, ch in "[a-zA-Z_%^=!]") {
        let error = calculate(&format!("{prefix} + {ch}")).expect_err("must fail");
        prop_assert_eq!(error.kind(), ErrorKind::InvalidExpression);
    }
}

//! Property-based tests for coefficient arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{CoefficientField, Field, Ring, Scalar, Q};

    fn small_rational() -> impl Strategy<Value = Q> {
        (-50i64..50, 1i64..20).prop_map(|(n, d)| Q::new(n, d))
    }

    // Elements c0 + c1*sqrt(2) of a fixed quadratic field
    fn quadratic_element(field: CoefficientField) -> impl Strategy<Value = Scalar> {
        (small_rational(), small_rational()).prop_map(move |(c0, c1)| {
            let a = field.generator().unwrap();
            Scalar::from(c0) + Scalar::from(c1) * a
        })
    }

    fn sqrt2() -> CoefficientField {
        CoefficientField::Rationals
            .extension(vec![Scalar::from(-2_i64), Scalar::from(0_i64), Scalar::from(1_i64)], "a")
            .unwrap()
    }

    proptest! {
        #[test]
        fn rational_distributive(
            a in small_rational(),
            b in small_rational(),
            c in small_rational(),
        ) {
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn rational_inverse(a in small_rational()) {
            prop_assume!(!a.is_zero());
            prop_assert!((a.clone() * a.inv().unwrap()).is_one());
        }

        #[test]
        fn rational_ceil_bounds(a in small_rational()) {
            let c = Q::from_integer(a.ceil_i64().unwrap());
            prop_assert!(c >= a);
            prop_assert!(c - Q::one() < a);
        }
    }

    #[test]
    fn quadratic_field_axioms() {
        let field = sqrt2();
        let mut runner = proptest::test_runner::TestRunner::default();
        let strategy = (
            quadratic_element(field.clone()),
            quadratic_element(field.clone()),
            quadratic_element(field),
        );

        runner
            .run(&strategy, |(a, b, c)| {
                prop_assert_eq!(a.clone() * b.clone(), b.clone() * a.clone());
                prop_assert_eq!(
                    (a.clone() * b.clone()) * c.clone(),
                    a.clone() * (b.clone() * c.clone())
                );
                prop_assert_eq!(
                    a.clone() * (b.clone() + c.clone()),
                    a.clone() * b.clone() + a.clone() * c
                );
                prop_assert_eq!(a.clone() - a.clone(), Scalar::zero());
                if !a.is_zero() {
                    prop_assert!((a.clone() * a.inv().unwrap()).is_one());
                }
                Ok(())
            })
            .unwrap();
    }
}

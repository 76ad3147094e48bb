//! Property-based tests for the field tower

use isopair_algorithms::ec::bn254::{Fp, Fp12, Fp2, Fp6};
use isopair_api::{DoubleElement, Field};
use isopair_tests::strategies::{element, nonzero_element};
use proptest::prelude::*;

macro_rules! field_properties {
    ($name:ident, $field:ty, $cases:expr) => {
        mod $name {
            use super::*;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                #[test]
                fn ring_axioms(
                    a in element::<$field>(),
                    b in element::<$field>(),
                    c in element::<$field>()
                ) {
                    prop_assert_eq!(a + b, b + a);
                    prop_assert_eq!(a * b, b * a);
                    prop_assert_eq!((a + b) + c, a + (b + c));
                    prop_assert_eq!((a * b) * c, a * (b * c));
                    prop_assert_eq!(a * (b + c), a * b + a * c);
                    prop_assert_eq!(a + <$field as Field>::zero(), a);
                    prop_assert_eq!(a * <$field as Field>::one(), a);
                    prop_assert_eq!(a - b + b, a);
                }

                #[test]
                fn inverse(a in nonzero_element::<$field>()) {
                    let inv = Field::invert(&a).unwrap();
                    prop_assert!(Field::is_one(&(a * inv)));
                    prop_assert_eq!(Field::invert(&inv).unwrap(), a);
                }

                #[test]
                fn byte_round_trip(a in element::<$field>()) {
                    let bytes = a.to_byte_array();
                    prop_assert_eq!(bytes.len(), <$field as Field>::ENCODED_SIZE);
                    prop_assert_eq!(<$field as Field>::from_byte_array(&bytes).unwrap(), a);
                }

                #[test]
                fn mutable_matches_immutable(
                    a in element::<$field>(),
                    b in element::<$field>()
                ) {
                    let mut x = a;
                    x += b;
                    prop_assert_eq!(x, a + b);

                    let mut x = a;
                    x -= b;
                    prop_assert_eq!(x, a - b);

                    let mut x = a;
                    x *= b;
                    prop_assert_eq!(x, a * b);

                    let mut x = a;
                    x.square_assign();
                    prop_assert_eq!(x, Field::square(&a));

                    let mut x = a;
                    x.double_assign();
                    prop_assert_eq!(x, Field::double(&a));

                    let mut x = a;
                    x.neg_assign();
                    prop_assert_eq!(x, -a);

                    let mut x = a;
                    x.div_by_two_assign();
                    prop_assert_eq!(x, Field::div_by_two(&a));

                    let mut x = a;
                    x.div_by_four_assign();
                    prop_assert_eq!(x, Field::div_by_four(&a));
                }

                #[test]
                fn double_precision_law(
                    a in element::<$field>(),
                    b in element::<$field>(),
                    c in element::<$field>(),
                    d in element::<$field>()
                ) {
                    prop_assert_eq!(a.mul_double(&b).reduce(), a * b);
                    prop_assert_eq!(a.square_double().reduce(), Field::square(&a));

                    let acc = DoubleElement::add(&a.mul_double(&b), &c.mul_double(&d));
                    prop_assert_eq!(acc.reduce(), a * b + c * d);

                    let acc = DoubleElement::sub(&a.mul_double(&b), &c.mul_double(&d));
                    prop_assert_eq!(acc.reduce(), a * b - c * d);
                }

                #[test]
                fn halving(a in element::<$field>()) {
                    prop_assert_eq!(Field::double(&Field::div_by_two(&a)), a);
                    prop_assert_eq!(Field::div_by_four(&a) * <$field as Field>::one().double().double(), a);
                }
            }
        }
    };
}

field_properties!(fp, Fp, 64);
field_properties!(fp2, Fp2, 48);
field_properties!(fp6, Fp6, 24);
field_properties!(fp12, Fp12, 16);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn fp_sqrt_of_square(a in element::<Fp>()) {
        let sq = Field::square(&a);
        let root = Field::sqrt(&sq).unwrap();
        prop_assert!(root == a || root == -a);
    }

    #[test]
    fn fp2_sqrt_of_square(a in element::<Fp2>()) {
        let sq = Field::square(&a);
        let root = Field::sqrt(&sq).unwrap();
        prop_assert_eq!(Field::square(&root), sq);
    }

    #[test]
    fn fp12_frobenius_is_homomorphism(a in element::<Fp12>(), b in element::<Fp12>(), k in 0usize..12) {
        prop_assert_eq!(
            Field::frobenius_map(&(a * b), k),
            Field::frobenius_map(&a, k) * Field::frobenius_map(&b, k)
        );
    }
}

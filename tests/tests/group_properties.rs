//! Property-based tests for G1 and G2

use isopair_algorithms::ec::bn254::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use isopair_api::{CurveGroup, Serialize};
use isopair_tests::strategies::{g1, g2, scalar};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn g1_group_laws(p in g1(), q in g1(), s in g1()) {
        let id = G1Projective::identity();
        prop_assert_eq!(p + q, q + p);
        prop_assert_eq!((p + q) + s, p + (q + s));
        prop_assert_eq!(p + id, p);
        prop_assert_eq!(p + p, p.twice());
        prop_assert_eq!(p - p, id);
        prop_assert!(p.is_valid());
    }

    #[test]
    fn g1_order_annihilates(p in g1()) {
        // [r - 1]P + P = ∞
        prop_assert!(bool::from((p * -Scalar::one() + p).is_identity()));
    }

    #[test]
    fn g1_scalar_distributes(p in g1(), a in scalar(), b in scalar()) {
        prop_assert_eq!(p * (a + b), p * a + p * b);
        prop_assert_eq!(p.mul_scalar(&a), p * a);
    }

    #[test]
    fn g1_encoding_round_trip(p in g1()) {
        let a = G1Affine::from(p);
        prop_assert_eq!(G1Affine::from_compressed(&a.to_compressed()).unwrap(), a);
        prop_assert_eq!(G1Affine::from_uncompressed(&a.to_uncompressed()).unwrap(), a);
        prop_assert_eq!(<G1Affine as Serialize>::from_bytes(&Serialize::to_bytes(&a)).unwrap(), a);
    }

    #[test]
    fn g1_twice_assign_matches_twice(p in g1()) {
        let mut x = p;
        x.twice_assign();
        prop_assert_eq!(x, p.twice());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn g2_group_laws(p in g2(), q in g2()) {
        let id = G2Projective::identity();
        prop_assert_eq!(p + q, q + p);
        prop_assert_eq!(p + id, p);
        prop_assert_eq!(p + p, p.twice());
        prop_assert!(p.is_valid());
        prop_assert!((p + q).is_valid());
    }

    #[test]
    fn g2_order_annihilates(p in g2()) {
        prop_assert!(bool::from((p * -Scalar::one() + p).is_identity()));
    }

    #[test]
    fn g2_psi_is_multiplication_by_q(p in g2()) {
        // q ≡ t - 1 (mod r)
        let q = isopair_algorithms::ec::bn254::Fp::modulus_biguint();
        prop_assert_eq!(p.psi(), p.mul_biguint(&q));
    }

    #[test]
    fn g2_encoding_round_trip(p in g2()) {
        let a = G2Affine::from(p);
        prop_assert_eq!(G2Affine::from_compressed(&a.to_compressed()).unwrap(), a);
        prop_assert_eq!(G2Affine::from_uncompressed(&a.to_uncompressed()).unwrap(), a);
    }

    #[test]
    fn g2_scalar_mut_matches_pure(p in g2(), k in scalar()) {
        let mut x = p;
        x.mul_scalar_assign(&k);
        prop_assert_eq!(x, p * k);
    }
}

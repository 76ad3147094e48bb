//! Property-based tests for the optimal-ate pairing

use isopair_algorithms::ec::bn254::{
    pairing, pairing_with, G1Affine, G2Affine, Gt, MillerLoopCoordinates,
};
use isopair_api::Pairing;
use isopair_tests::fixtures::seeded_engine;
use isopair_tests::strategies::{g1, g2, scalar};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn bilinearity(a in scalar(), b in scalar()) {
        let p = G1Affine::generator();
        let q = G2Affine::generator();
        let e = Gt::generator();

        let lhs = pairing(&G2Affine::from(q * b), &G1Affine::from(p * a));
        prop_assert_eq!(lhs, e.pow(&(a * b)));
    }

    #[test]
    fn linear_in_g1(p1 in g1(), p2 in g1(), q in g2()) {
        let q = G2Affine::from(q);
        let sum = pairing(&q, &G1Affine::from(p1 + p2));
        let product = pairing(&q, &G1Affine::from(p1)) * pairing(&q, &G1Affine::from(p2));
        prop_assert_eq!(sum, product);
    }

    #[test]
    fn coordinate_systems_agree(p in g1(), q in g2()) {
        let p = G1Affine::from(p);
        let q = G2Affine::from(q);
        prop_assert_eq!(
            pairing_with(&q, &p, MillerLoopCoordinates::Affine),
            pairing_with(&q, &p, MillerLoopCoordinates::Mixed)
        );
    }

    #[test]
    fn negation_inverts(p in g1(), q in g2()) {
        let p = G1Affine::from(p);
        let q = G2Affine::from(q);
        prop_assert_eq!(pairing(&q, &-p), pairing(&q, &p).invert());
    }

    #[test]
    fn engine_check_matches_product(seed in any::<u64>(), a in scalar()) {
        let mut engine = seeded_engine(seed, MillerLoopCoordinates::Mixed);
        let p = G1Affine::generator();
        let q = G2Affine::generator();
        let pa = G1Affine::from(p * a);
        let qa = G2Affine::from(q * a);

        // e(aP, Q) = e(P, aQ)
        prop_assert!(engine.verify_equality(&pa, &q, &p, &qa));
        prop_assert!(engine.pairing_check(&[(pa, q), (-p, qa)]));
        prop_assert_eq!(
            engine.multi_pairing(&[(pa, q), (p, qa)]),
            engine.pairing(&q, &pa) * engine.pairing(&qa, &p)
        );
    }
}

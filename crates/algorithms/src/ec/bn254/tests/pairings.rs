//! Pairing tests: known answer, bilinearity and the Gt group

use super::super::field::element_from_components_str;
use super::super::field::fp::Fp;
use super::super::field::fp12::Fp12;
use super::super::{
    multi_miller_loop, pairing, pairing_with, G1Affine, G1Projective, G2Affine, G2Prepared,
    G2Projective, Gt, MillerLoopCoordinates, Scalar, LINE_COUNT,
};

use isopair_api::{Field, Serialize};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0xe000_0001)
}

/// e(P2, P1) for the fixed generators, in serialization order
const GENERATOR_PAIRING: [&str; 12] = [
    "fab4910966c09d05047db8e3b7d21737dbb9242632c07f24eb8881efaa88435",
    "2413a8182093a786c5db7fe7ed6b8c54d050cc338dcecfe1f3e0f705cc9a680b",
    "11e71cf508ee85006578af9820d1951b4dcca98dedf23dedc9ed3e797ef2bbc5",
    "21816628e1707091752f65b2eec3629f1f5d9a848e0a0276cca671cf42d3ab82",
    "14282650635e44352698729f3233b7a3b8aa22103650a1ed2d945af0b2c648e3",
    "ad1b6bc78cd9f9af5145942a3cdb7e7f1fe110e763d6b2e8e18897b2ee16fa7",
    "ff9baed59102d1a1d61963ebce82acb6a79cdd662b7515a7f5034fafd6ad15d",
    "136983b93b5ac3a4cabe06dde10d7b7146f47f8bf85ef4ecc32b9b0469b9b88a",
    "17e07fde69bb4034ccb25bed088e0d74e71365eeaec36faf31b94636aa1ee4b7",
    "11fc764d2cb86b64e1586cdd0966901c27f81f1ef17e2d91f5cd2cacd614e851",
    "10f323f3260171d171482264a4e74e1faf158ac4e5ae04c8fadfa9dc0d1bf6d",
    "21da404f4fe16f40a46515f9a24a196ba3c00db9a8597bf4e1de588b541e95eb",
];

// ============================================================================
// Known answer
// ============================================================================

#[test]
fn test_generator_pairing_known_answer() {
    let expected: Fp12 = element_from_components_str(&GENERATOR_PAIRING, 16).unwrap();

    let mixed = pairing(&G2Affine::generator(), &G1Affine::generator());
    assert_eq!(mixed.value(), expected);

    let affine = pairing_with(
        &G2Affine::generator(),
        &G1Affine::generator(),
        MillerLoopCoordinates::Affine,
    );
    assert_eq!(affine.value(), expected);
    assert_eq!(Gt::generator(), mixed);
}

#[test]
fn test_final_exponentiation_exponent() {
    let q = Fp::modulus_biguint();
    let r = Scalar::modulus_biguint();
    let exponent = (q.pow(12) - 1u32) / r;

    let prepared = G2Prepared::from(G2Affine::generator());
    let f = multi_miller_loop(&[(&G1Affine::generator(), &prepared)]);
    let expected = Field::pow(&f.value(), &exponent.to_u64_digits());
    assert_eq!(f.final_exponentiation().value(), expected);
}

// ============================================================================
// Bilinearity and degeneracy
// ============================================================================

#[test]
fn test_bilinearity() {
    let mut rng = rng();
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    let p = G1Affine::generator();
    let q = G2Affine::generator();
    let e = pairing(&q, &p);

    let pa = G1Affine::from(p * a);
    let qb = G2Affine::from(q * b);

    assert_eq!(pairing(&qb, &pa), e.pow(&(a * b)));
    assert_eq!(pairing(&q, &pa), e.pow(&a));
    assert_eq!(pairing(&qb, &p), e.pow(&b));
    assert_eq!(pairing(&G2Affine::from(q * a), &p), pairing(&q, &pa));
}

#[test]
fn test_additivity_in_each_argument() {
    let mut rng = rng();
    let p1 = G1Projective::random(&mut rng);
    let p2 = G1Projective::random(&mut rng);
    let q1 = G2Projective::random(&mut rng);
    let q2 = G2Projective::random(&mut rng);

    let q1a = G2Affine::from(q1);
    let p1a = G1Affine::from(p1);

    assert_eq!(
        pairing(&q1a, &G1Affine::from(p1 + p2)),
        pairing(&q1a, &p1a) * pairing(&q1a, &G1Affine::from(p2))
    );
    assert_eq!(
        pairing(&G2Affine::from(q1 + q2), &p1a),
        pairing(&q1a, &p1a) * pairing(&G2Affine::from(q2), &p1a)
    );
}

#[test]
fn test_non_degeneracy() {
    let e = pairing(&G2Affine::generator(), &G1Affine::generator());
    assert!(!bool::from(e.is_identity()));
    assert!(bool::from(e.is_torsion_free()));
}

#[test]
fn test_identity_inputs() {
    let p = G1Affine::generator();
    let q = G2Affine::generator();

    for coords in [MillerLoopCoordinates::Mixed, MillerLoopCoordinates::Affine] {
        assert!(bool::from(pairing_with(&q, &G1Affine::identity(), coords).is_identity()));
        assert!(bool::from(pairing_with(&G2Affine::identity(), &p, coords).is_identity()));
        assert!(bool::from(
            pairing_with(&G2Affine::identity(), &G1Affine::identity(), coords).is_identity()
        ));
    }
}

#[test]
fn test_negation() {
    let mut rng = rng();
    let p = G1Affine::from(G1Projective::random(&mut rng));
    let q = G2Affine::from(G2Projective::random(&mut rng));

    let e = pairing(&q, &p);
    assert_eq!(pairing(&q, &-p), e.invert());
    assert_eq!(pairing(&-q, &p), e.invert());
    assert_eq!(pairing(&-q, &-p), e);
    assert!(bool::from((pairing(&q, &-p) * e).is_identity()));
}

// ============================================================================
// Coordinate systems and prepared points
// ============================================================================

#[test]
fn test_affine_matches_mixed() {
    let mut rng = rng();
    for _ in 0..3 {
        let p = G1Affine::from(G1Projective::random(&mut rng));
        let q = G2Affine::from(G2Projective::random(&mut rng));
        assert_eq!(
            pairing_with(&q, &p, MillerLoopCoordinates::Affine),
            pairing_with(&q, &p, MillerLoopCoordinates::Mixed)
        );
    }
}

#[test]
fn test_prepared_lines() {
    let q = G2Affine::generator();
    let mixed = G2Prepared::new(&q, MillerLoopCoordinates::Mixed);
    let affine = G2Prepared::new(&q, MillerLoopCoordinates::Affine);

    assert_eq!(mixed.coeffs().len(), LINE_COUNT);
    assert_eq!(affine.coeffs().len(), LINE_COUNT);
    assert_eq!(mixed.coordinates(), MillerLoopCoordinates::Mixed);
    assert_eq!(affine.coordinates(), MillerLoopCoordinates::Affine);
    assert!(!bool::from(mixed.is_identity()));
    assert!(bool::from(
        G2Prepared::new(&G2Affine::identity(), MillerLoopCoordinates::Mixed).is_identity()
    ));
}

#[test]
fn test_prepared_buffer_reuse() {
    let mut rng = rng();
    let q1 = G2Affine::from(G2Projective::random(&mut rng));
    let q2 = G2Affine::from(G2Projective::random(&mut rng));
    let p = G1Affine::generator();

    let first = G2Prepared::new(&q1, MillerLoopCoordinates::Mixed);
    let buf = first.into_coeffs();
    let reused = G2Prepared::with_buffer(&q2, MillerLoopCoordinates::Mixed, buf);
    let fresh = G2Prepared::new(&q2, MillerLoopCoordinates::Mixed);

    assert_eq!(reused.coeffs(), fresh.coeffs());
    assert_eq!(
        multi_miller_loop(&[(&p, &reused)]).final_exponentiation(),
        pairing(&q2, &p)
    );
}

#[test]
fn test_multi_miller_loop_is_product() {
    let mut rng = rng();
    let mut g1 = Vec::new();
    let mut g2 = Vec::new();
    for _ in 0..3 {
        g1.push(G1Affine::from(G1Projective::random(&mut rng)));
        g2.push(G2Prepared::from(G2Affine::from(G2Projective::random(&mut rng))));
    }
    // An identity term contributes nothing
    g1.push(G1Affine::identity());
    g2.push(G2Prepared::from(G2Affine::generator()));

    let terms: Vec<(&G1Affine, &G2Prepared)> = g1.iter().zip(g2.iter()).collect();
    let combined = multi_miller_loop(&terms).final_exponentiation();

    let separate: Gt = terms
        .iter()
        .map(|(p, q)| multi_miller_loop(&[(*p, *q)]).final_exponentiation())
        .product();
    assert_eq!(combined, separate);

    let loops = terms
        .iter()
        .map(|(p, q)| multi_miller_loop(&[(*p, *q)]))
        .fold(multi_miller_loop(&[]), |acc, f| acc * f);
    assert_eq!(loops.final_exponentiation(), combined);
}

#[test]
fn test_pairing_product_check() {
    let mut rng = rng();
    let a = Scalar::random(&mut rng);
    let p = G1Affine::generator();
    let q = G2Affine::generator();

    // e(aP, Q) * e(-P, aQ) = 1
    let pa = G1Affine::from(p * a);
    let qa = G2Prepared::from(G2Affine::from(q * a));
    let qp = G2Prepared::from(q);
    let neg_p = -p;
    let check = multi_miller_loop(&[(&pa, &qp), (&neg_p, &qa)]).final_exponentiation();
    assert!(bool::from(check.is_identity()));
}

// ============================================================================
// Gt
// ============================================================================

#[test]
fn test_gt_group_operations() {
    let mut rng = rng();
    let g = Gt::generator();
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    assert_eq!(g.pow(&a) * g.pow(&b), g.pow(&(a + b)));
    assert_eq!(g.pow(&a).pow(&b), g.pow(&(a * b)));
    assert_eq!(g.pow(&Scalar::zero()), Gt::identity());
    assert_eq!(g.pow(&Scalar::one()), g);
    assert_eq!(g.pow(&-Scalar::one()), g.invert());
    assert_eq!(g.square(), g * g);
    assert_eq!(g * Gt::identity(), g);
    assert!(bool::from((g * g.invert()).is_identity()));
}

#[test]
fn test_gt_random_in_subgroup() {
    let mut rng = rng();
    let x = Gt::random(&mut rng);
    assert!(bool::from(x.is_torsion_free()));
    assert_eq!(x.invert().value(), x.value().invert().unwrap());
}

#[test]
fn test_gt_encoding() {
    let g = Gt::generator();
    let bytes = g.to_bytes();
    assert_eq!(Gt::from_slice(&bytes).unwrap(), g);
    assert_eq!(<Gt as Serialize>::from_bytes(&Serialize::to_bytes(&g)).unwrap(), g);

    // Non-zero but outside the order-r subgroup
    let outside = Fp12::from(Fp::from(2u64)).to_bytes();
    assert!(Gt::from_slice(&outside).is_err());

    let zero = Fp12::zero().to_bytes();
    assert!(Gt::from_slice(&zero).is_err());
    assert!(Gt::from_slice(&bytes[1..]).is_err());
}

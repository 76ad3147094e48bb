//! End-to-end tests: domain parameters, the known pairing value and
//! credential-style verification equations.

use isopair::prelude::*;
use isopair_tests::fixtures::{generator_pairing, seeded_engine, MODULUS_HEX, ORDER_HEX};
use num_bigint::BigUint;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_domain_parameters() {
    let params = PairingEngine::domain_parameters().unwrap();
    params.verify().unwrap();

    let q = BigUint::parse_bytes(MODULUS_HEX.as_bytes(), 16).unwrap();
    let r = BigUint::parse_bytes(ORDER_HEX.as_bytes(), 16).unwrap();
    assert_eq!(params.modulus, q);
    assert_eq!(params.order, r);
    assert_eq!(params.modulus, Fp::modulus_biguint());
    assert_eq!(params.order, Scalar::modulus_biguint());
    assert_eq!(params.b, BigUint::from(2u8));
    assert_eq!(params.embedding_degree, 12);
    assert_eq!(params.g1_cofactor, BigUint::from(1u8));
    assert_eq!(params.trace, params.modulus.clone() + 1u8 - &params.order);

    // P1 = (-1, 1)
    assert_eq!(params.g1_generator[0], q.clone() - 1u8);
    assert_eq!(params.g1_generator[1], BigUint::from(1u8));
}

#[test]
fn test_generator_pairing_literal() {
    init_tracing();
    let expected = generator_pairing();

    for coordinates in [MillerLoopCoordinates::Mixed, MillerLoopCoordinates::Affine] {
        let mut engine = seeded_engine(1, coordinates);
        let e = engine.pairing(&G2Affine::generator(), &G1Affine::generator());
        assert_eq!(e.value(), expected, "coordinates: {}", coordinates);
        engine.log_pool_statistics();
    }
}

#[test]
fn test_credential_verification() {
    init_tracing();
    let mut engine = seeded_engine(2024, MillerLoopCoordinates::Mixed);
    let p2 = G2Affine::generator();

    // Issuer key: y and Y = [y]P2
    let y = engine.random_scalar();
    let big_y = G2Affine::from(p2 * y);

    for _ in 0..3 {
        // Credential: A in G1 and B = [y]A
        let a = G1Affine::from(engine.random_generator_g1());
        let b = G1Affine::from(a * y);

        // e(A, Y) = e(B, P2)
        assert!(engine.verify_equality(&a, &big_y, &b, &p2));
        assert_eq!(engine.pairing(&big_y, &a), engine.pairing(&p2, &b));

        // Randomized credential (A', B') = ([l]A, [l]B) still verifies
        let l = engine.random_scalar();
        let a2 = G1Affine::from(a * l);
        let b2 = G1Affine::from(b * l);
        assert!(engine.verify_equality(&a2, &big_y, &b2, &p2));

        // A credential under a different key is rejected
        let forged = G1Affine::from(a * (y + Scalar::one()));
        assert!(!engine.verify_equality(&a, &big_y, &forged, &p2));
    }
}

#[test]
fn test_credential_from_encoded_points() {
    let mut engine = seeded_engine(7, MillerLoopCoordinates::Affine);
    let p2 = G2Affine::generator();
    let y = engine.random_scalar();

    let key_bytes = Serialize::to_bytes(&G2Affine::from(p2 * y));
    let a = G1Affine::from(engine.random_generator_g1());
    let b_bytes = G1Affine::from(a * y).to_uncompressed();

    let big_y = <G2Affine as Serialize>::from_bytes(&key_bytes).unwrap();
    let b = G1Affine::from_uncompressed(&b_bytes).unwrap();
    assert!(engine.verify_equality(&a, &big_y, &b, &p2));

    // A tampered key either fails to decode or fails the check
    let mut tampered = key_bytes.clone();
    tampered[40] ^= 0x01;
    if let Ok(bad_y) = <G2Affine as Serialize>::from_bytes(&tampered) {
        assert!(!engine.verify_equality(&a, &bad_y, &b, &p2));
    }
}

#[test]
fn test_engine_pool_reuse_across_pairings() {
    let mut engine = PairingEngine::new(
        EngineConfig::new()
            .with_seed([9u8; 32])
            .with_pool_capacity(4),
    );
    let p = G1Affine::generator();
    let q = G2Affine::generator();

    let first = engine.multi_pairing(&[(p, q), (-p, q)]);
    assert!(bool::from(first.is_identity()));
    let misses = engine.pool().misses();

    let second = engine.multi_pairing(&[(p, q), (-p, q)]);
    assert_eq!(first, second);
    assert_eq!(engine.pool().misses(), misses);
    assert!(engine.pool().hits() >= 2);
}

#[test]
fn test_gt_bytes_round_trip() {
    let e = Gt::generator();
    let bytes = Serialize::to_bytes(&e);
    assert_eq!(bytes.len(), 384);
    assert_eq!(<Gt as Serialize>::from_bytes(&bytes).unwrap(), e);
    assert_eq!(e.value(), generator_pairing());
}

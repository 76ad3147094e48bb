//! Field tower tests for Fp254BNb

use super::super::field::fp::Fp;
use super::super::field::fp12::Fp12;
use super::super::field::fp2::Fp2;
use super::super::field::fp6::Fp6;
use super::super::field::{element_from_components_str, element_from_components_u64, to_string_radix};

use isopair_api::{DoubleElement, Field};
use num_bigint::BigUint;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x5eed)
}

fn q_limbs() -> Vec<u64> {
    Fp::modulus_biguint().to_u64_digits()
}

// ============================================================================
// Generic checks, run at every tower level
// ============================================================================

fn check_field_axioms<F: Field>(rng: &mut ChaCha20Rng) {
    for _ in 0..10 {
        let a = F::random(rng);
        let b = F::random(rng);
        let c = F::random(rng);

        assert_eq!(a + b, b + a);
        assert_eq!(a * b, b * a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!((a * b) * c, a * (b * c));
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!(a + F::zero(), a);
        assert_eq!(a * F::one(), a);
        assert_eq!(a - a, F::zero());
        assert_eq!(a + (-a), F::zero());
        assert_eq!(a.square(), a * a);
        assert_eq!(a.double(), a + a);
        assert_eq!(a.div_by_two().double(), a);
        assert_eq!(a.div_by_four().double().double(), a);

        if !a.is_zero() {
            let inv = a.invert().unwrap();
            assert!((a * inv).is_one());
        }
    }
    assert!(F::zero().invert().is_err());
}

fn check_double_precision<F: Field>(rng: &mut ChaCha20Rng) {
    for _ in 0..10 {
        let a = F::random(rng);
        let b = F::random(rng);
        let c = F::random(rng);
        let d = F::random(rng);

        assert_eq!(a.mul_double(&b).reduce(), a * b);
        assert_eq!(a.square_double().reduce(), a.square());

        let sum = a.mul_double(&b).add(&c.mul_double(&d));
        assert_eq!(sum.reduce(), a * b + c * d);

        let diff = a.mul_double(&b).sub(&c.mul_double(&d));
        assert_eq!(diff.reduce(), a * b - c * d);

        let mut acc = F::Double::zero();
        acc.add_assign(&a.mul_double(&b));
        acc.sub_assign(&c.square_double());
        assert_eq!(acc.reduce(), a * b - c.square());
    }
}

fn check_assign_forms<F: Field>(rng: &mut ChaCha20Rng) {
    let a = F::random(rng);
    let b = F::random(rng);

    let mut x = a;
    x += b;
    assert_eq!(x, a + b);
    let mut x = a;
    x -= b;
    assert_eq!(x, a - b);
    let mut x = a;
    x *= b;
    assert_eq!(x, a * b);
    let mut x = a;
    x.square_assign();
    assert_eq!(x, a.square());
    let mut x = a;
    x.double_assign().neg_assign();
    assert_eq!(x, -a.double());
    let mut x = a;
    x.invert_assign().unwrap();
    assert_eq!(x, a.invert().unwrap());

    let mut zero = F::zero();
    assert!(zero.invert_assign().is_err());
    assert!(zero.is_zero());
}

fn check_sqrt<F: Field>(rng: &mut ChaCha20Rng) {
    for _ in 0..5 {
        let a = F::random(rng);
        let sq = a.square();
        let root = sq.sqrt().unwrap();
        assert_eq!(root.square(), sq);
    }
}

fn check_frobenius<F: Field>(rng: &mut ChaCha20Rng) {
    let q = q_limbs();
    let a = F::random(rng);
    let mut expected = a;
    for power in 1..=F::DEGREE {
        expected = expected.pow(&q);
        assert_eq!(a.frobenius_map(power), expected, "power {}", power);
    }
    assert_eq!(a.frobenius_map(F::DEGREE), a);
}

fn check_bytes<F: Field>(rng: &mut ChaCha20Rng) {
    let a = F::random(rng);
    let bytes = a.to_byte_array();
    assert_eq!(bytes.len(), F::ENCODED_SIZE);
    assert_eq!(F::from_byte_array(&bytes).unwrap(), a);

    assert!(F::from_byte_array(&bytes[1..]).is_err());
    let mut long = bytes.clone();
    long.push(0);
    assert!(F::from_byte_array(&long).is_err());

    let mut bad = bytes;
    bad[..32].copy_from_slice(&Fp::modulus_biguint().to_bytes_be());
    assert!(F::from_byte_array(&bad).is_err());
}

fn check_constant_time_surface<F: Field>(rng: &mut ChaCha20Rng) {
    let a = F::random(rng);
    let b = a + F::one();

    assert!(bool::from(a.ct_eq(&a)));
    assert!(!bool::from(a.ct_eq(&b)));
    assert_eq!(F::conditional_select(&a, &b, Choice::from(0u8)), a);
    assert_eq!(F::conditional_select(&a, &b, Choice::from(1u8)), b);
    assert!(F::one().is_one());

    let mut x = a;
    x.zeroize();
    assert!(x.is_zero());

    let mut acc = a.mul_double(&b);
    acc.zeroize();
    assert_eq!(acc, F::Double::zero());
}

#[test]
fn test_constant_time_surface_all_levels() {
    let mut rng = rng();
    check_constant_time_surface::<Fp>(&mut rng);
    check_constant_time_surface::<Fp2>(&mut rng);
    check_constant_time_surface::<Fp6>(&mut rng);
    check_constant_time_surface::<Fp12>(&mut rng);
}

#[test]
fn test_field_axioms_all_levels() {
    let mut rng = rng();
    check_field_axioms::<Fp>(&mut rng);
    check_field_axioms::<Fp2>(&mut rng);
    check_field_axioms::<Fp6>(&mut rng);
    check_field_axioms::<Fp12>(&mut rng);
}

#[test]
fn test_double_precision_all_levels() {
    let mut rng = rng();
    check_double_precision::<Fp>(&mut rng);
    check_double_precision::<Fp2>(&mut rng);
    check_double_precision::<Fp6>(&mut rng);
    check_double_precision::<Fp12>(&mut rng);
}

#[test]
fn test_assign_forms_all_levels() {
    let mut rng = rng();
    check_assign_forms::<Fp>(&mut rng);
    check_assign_forms::<Fp2>(&mut rng);
    check_assign_forms::<Fp6>(&mut rng);
    check_assign_forms::<Fp12>(&mut rng);
}

#[test]
fn test_sqrt_all_levels() {
    let mut rng = rng();
    check_sqrt::<Fp>(&mut rng);
    check_sqrt::<Fp2>(&mut rng);
    check_sqrt::<Fp6>(&mut rng);
    check_sqrt::<Fp12>(&mut rng);
}

#[test]
fn test_frobenius_all_levels() {
    let mut rng = rng();
    check_frobenius::<Fp2>(&mut rng);
    check_frobenius::<Fp6>(&mut rng);
    check_frobenius::<Fp12>(&mut rng);
}

#[test]
fn test_bytes_all_levels() {
    let mut rng = rng();
    check_bytes::<Fp>(&mut rng);
    check_bytes::<Fp2>(&mut rng);
    check_bytes::<Fp6>(&mut rng);
    check_bytes::<Fp12>(&mut rng);
}

// ============================================================================
// Fp Field Tests
// ============================================================================

#[test]
fn test_fp_conditional_selection() {
    let a = Fp::from(5u64);
    let b = Fp::from(9u64);

    assert_eq!(
        ConditionallySelectable::conditional_select(&a, &b, Choice::from(0u8)),
        a
    );
    assert_eq!(
        ConditionallySelectable::conditional_select(&a, &b, Choice::from(1u8)),
        b
    );
}

#[test]
fn test_fp_equality() {
    fn is_equal(a: &Fp, b: &Fp) -> bool {
        let eq = a == b;
        let ct_eq = a.ct_eq(b);
        assert_eq!(eq, bool::from(ct_eq));
        eq
    }

    assert!(is_equal(&Fp::from(7u64), &Fp::from(7u64)));
    assert!(!is_equal(&Fp::from(7u64), &Fp::from(8u64)));
    assert!(is_equal(&(-Fp::one()), &Fp::from_raw([
        0xa700_0000_0000_0012,
        0x6121_0000_0000_0013,
        0xba34_4d80_0000_0008,
        0x2523_6482_4000_0001,
    ])));
}

#[test]
fn test_fp_non_residue() {
    // q ≡ 3 (mod 4), so -1 is a non-residue
    assert!(bool::from((-Fp::one()).sqrt().is_none()));
    assert!(Field::sqrt(&(-Fp::one())).is_err());
    assert_eq!(Fp::from(4u64).sqrt().unwrap().square(), Fp::from(4u64));
}

#[test]
fn test_fp_legendre() {
    assert_eq!(Fp::zero().legendre(), 0);
    assert_eq!(Fp::from(4u64).legendre(), 1);
    assert_eq!((-Fp::one()).legendre(), -1);
}

// ============================================================================
// Extension Field Tests
// ============================================================================

#[test]
fn test_fp2_u_squared_is_minus_one() {
    let u = Fp2::new(Fp::zero(), Fp::one());
    assert_eq!(u.square(), -Fp2::one());
}

#[test]
fn test_fp2_mul_by_xi() {
    let mut rng = rng();
    let xi = Fp2::new(Fp::one(), Fp::one());
    let a = Fp2::random(&mut rng);
    assert_eq!(a.mul_by_xi(), a * xi);
    assert_eq!(a.mul_unreduced(&a).mul_by_xi().reduce(), a.square() * xi);
}

#[test]
fn test_fp2_const_arithmetic() {
    const A: Fp2 = Fp2 {
        c0: Fp::from_raw([3, 0, 0, 0]),
        c1: Fp::from_raw([5, 0, 0, 0]),
    };
    const B: Fp2 = Fp2 {
        c0: Fp::from_raw([7, 0, 0, 0]),
        c1: Fp::from_raw([11, 0, 0, 0]),
    };
    const SUM: Fp2 = (&A).add(&B);
    const DIFF: Fp2 = (&A).sub(&B);
    const NEG: Fp2 = (&A).neg();
    const PRODUCT: Fp2 = (&A).mul(&B);
    const SQUARE: Fp2 = (&A).square();
    const XI_A: Fp2 = (&A).mul_by_xi();
    const SCALED: Fp2 = (&A).mul_by_fp(&Fp::from_raw([2, 0, 0, 0]));

    let a = Fp2::new(Fp::from(3u64), Fp::from(5u64));
    let b = Fp2::new(Fp::from(7u64), Fp::from(11u64));
    assert_eq!(SUM, a + b);
    assert_eq!(DIFF, a - b);
    assert_eq!(NEG, -a);
    assert_eq!(PRODUCT, a * b);
    assert_eq!(SQUARE, a * a);
    assert_eq!(XI_A, a * Fp2::new(Fp::one(), Fp::one()));
    assert_eq!(SCALED, a + a);

    // (3 + 5u)(7 + 11u) = -34 + 68u
    assert_eq!(PRODUCT, Fp2::new(-Fp::from(34u64), Fp::from(68u64)));
}

#[test]
fn test_fp2_norm_and_conjugate() {
    let mut rng = rng();
    let a = Fp2::random(&mut rng);
    assert_eq!(Fp2::from(a.norm()), a * a.conjugate());
}

#[test]
fn test_fp6_v_cubed_is_xi() {
    let xi = Fp2::new(Fp::one(), Fp::one());
    let v = Fp6::v();
    assert_eq!(v * v * v, Fp6::from(xi));
}

#[test]
fn test_fp6_sparse_multiplication() {
    let mut rng = rng();
    let a = Fp6::random(&mut rng);
    let c0 = Fp2::random(&mut rng);
    let c1 = Fp2::random(&mut rng);

    let sparse = Fp6 {
        c0,
        c1,
        c2: Fp2::zero(),
    };
    assert_eq!(a.mul_by_01(&c0, &c1), a * sparse);

    let sparse = Fp6 {
        c0: Fp2::zero(),
        c1,
        c2: Fp2::zero(),
    };
    assert_eq!(a.mul_by_1(&c1), a * sparse);
    assert_eq!(a.mul_by_v(), a * Fp6::v());
    assert_eq!(a.mul_by_fp2(&c0), a * Fp6::from(c0));
    assert_eq!(a.mul_unreduced(&sparse).reduce(), a.mul_by_1(&c1));
}

#[test]
fn test_fp12_w_squared_is_v() {
    let w = Fp12::w();
    assert_eq!(w.square(), Fp12::from(Fp6::v()));
}

#[test]
fn test_fp12_mul_by_034() {
    let mut rng = rng();
    let f = Fp12::random(&mut rng);
    let l0 = Fp2::random(&mut rng);
    let l3 = Fp2::random(&mut rng);
    let l4 = Fp2::random(&mut rng);

    let line = Fp12 {
        c0: Fp6 {
            c0: l0,
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        },
        c1: Fp6 {
            c0: l3,
            c1: l4,
            c2: Fp2::zero(),
        },
    };
    assert_eq!(f.mul_by_034(&l0, &l3, &l4), f * line);
}

#[test]
fn test_fp12_cyclotomic_square() {
    let mut rng = rng();
    let f = Fp12::random(&mut rng);
    // f^((q^6 - 1)(q^2 + 1)) lies in the cyclotomic subgroup
    let g = f.conjugate() * f.invert().unwrap();
    let g = g.frobenius_map(2) * g;
    assert_eq!(g.cyclotomic_square(), g.square());
    assert_eq!(g.invert().unwrap(), g.conjugate());
}

#[test]
fn test_fp12_frobenius_wraps() {
    let mut rng = rng();
    let f = Fp12::random(&mut rng);
    assert_eq!(f.frobenius_map(6), f.conjugate());
    assert_eq!(f.frobenius_map(12), f);
    assert_eq!(f.frobenius_map(7), f.frobenius_map(1).frobenius_map(6));
}

// ============================================================================
// Component and radix helpers
// ============================================================================

#[test]
fn test_element_from_components() {
    let a: Fp6 = element_from_components_u64(&[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(to_string_radix(&a, 10).unwrap(), "[1, 2, 3, 4, 5, 6]");

    let b: Fp2 = element_from_components_str(&["ff", "10"], 16).unwrap();
    assert_eq!(b, Fp2::new(Fp::from(255u64), Fp::from(16u64)));
    assert_eq!(to_string_radix(&b, 16).unwrap(), "[ff, 10]");

    let c: Fp = element_from_components_str(&["12345"], 10).unwrap();
    assert_eq!(to_string_radix(&c, 10).unwrap(), "12345");
}

#[test]
fn test_element_from_components_rejects() {
    assert!(element_from_components_u64::<Fp2>(&[1]).is_err());
    assert!(element_from_components_u64::<Fp12>(&[0; 11]).is_err());
    assert!(element_from_components_str::<Fp2>(&["1", "zz"], 10).is_err());
    assert!(element_from_components_str::<Fp2>(&["1", "2"], 1).is_err());

    let q = Fp::modulus_biguint().to_str_radix(16);
    assert!(element_from_components_str::<Fp>(&[q.as_str()], 16).is_err());
    let q_minus_1 = (Fp::modulus_biguint() - BigUint::from(1u8)).to_str_radix(16);
    let x: Fp = element_from_components_str(&[q_minus_1.as_str()], 16).unwrap();
    assert_eq!(x, -Fp::one());
}

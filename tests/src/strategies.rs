// src/strategies.rs
//! proptest strategies for field elements, scalars and points.
//!
//! Values are derived from a shrinkable 64-bit seed through ChaCha20, so a
//! failing case reports the seed rather than raw limbs.

use isopair_algorithms::ec::bn254::{G1Projective, G2Projective, Scalar};
use isopair_api::Field;
use proptest::prelude::*;

use crate::fixtures::seeded_rng;

/// Uniform element of any tower level
pub fn element<F: Field>() -> impl Strategy<Value = F> {
    any::<u64>().prop_map(|seed| F::random(&mut seeded_rng(seed)))
}

/// Uniform non-zero element of any tower level
pub fn nonzero_element<F: Field>() -> impl Strategy<Value = F> {
    element::<F>().prop_filter("zero has no inverse", |x| !x.is_zero())
}

/// Uniform scalar mod r
pub fn scalar() -> impl Strategy<Value = Scalar> {
    any::<u64>().prop_map(|seed| Scalar::random(seeded_rng(seed)))
}

/// Random point of G1
pub fn g1() -> impl Strategy<Value = G1Projective> {
    any::<u64>().prop_map(|seed| G1Projective::random(seeded_rng(seed)))
}

/// Random point of G2
pub fn g2() -> impl Strategy<Value = G2Projective> {
    any::<u64>().prop_map(|seed| G2Projective::random(seeded_rng(seed)))
}

//! Fp254BNb test suite
//!
//! Tests are organized into focused modules for better maintainability.

use super::field::fp2::Fp2;
use super::g2::TWIST_B;
use super::G2Affine;
use rand_chacha::ChaCha20Rng;
use subtle::Choice;

mod field;
mod pairings;

/// A point on the twist outside the order-r subgroup
fn twist_point_outside_subgroup(rng: &mut ChaCha20Rng) -> G2Affine {
    loop {
        let x = Fp2::random(&mut *rng);
        let rhs = x.square() * x + TWIST_B;
        if let Some(y) = Option::<Fp2>::from(rhs.sqrt()) {
            let p = G2Affine {
                x,
                y,
                infinity: Choice::from(0u8),
            };
            if !bool::from(p.is_torsion_free()) {
                return p;
            }
        }
    }
}

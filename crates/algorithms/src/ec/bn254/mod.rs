//! Fp254BNb Barreto-Naehrig pairing-friendly curve.
//!
//! E: y² = x³ + 2 over Fq with G₂ on the D-type sextic twist over Fq2 and
//! the optimal-ate pairing into the order-r subgroup of Fq12*.
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

// Module declarations
pub mod field;
mod g1;
mod g2;
mod pairings;
mod params;
mod scalar;

#[cfg(test)]
mod tests;

// Public API exports
pub use field::fp::{Fp, FpDouble};
pub use field::fp12::{Fp12, Fp12Double};
pub use field::fp2::{Fp2, Fp2Double};
pub use field::fp6::{Fp6, Fp6Double};
pub use field::{element_from_components_str, element_from_components_u64, to_string_radix};
pub use g1::{G1Affine, G1Projective, G1_COMPRESSED_BYTES, G1_UNCOMPRESSED_BYTES};
pub use g2::{G2Affine, G2Projective, G2_COMPRESSED_BYTES, G2_UNCOMPRESSED_BYTES};
pub use pairings::{
    multi_miller_loop, pairing, pairing_with, G2Prepared, Gt, LineCoeffs, MillerLoopCoordinates,
    MillerLoopResult, LINE_COUNT,
};
pub use params::DomainParameters;
pub use scalar::{Scalar, SCALAR_BYTES};

// BN curve parameters
/// |u| for u = -(2^62 + 2^55 + 1)
pub(crate) const BN_U: u64 = isopair_params::pairing::bn254::BN_U;
/// Sign of u
pub(crate) const BN_U_IS_NEGATIVE: bool = isopair_params::pairing::bn254::BN_U_IS_NEGATIVE;
/// |6u + 2|, the optimal-ate loop length
pub(crate) const ATE_LOOP_COUNT: u128 = 6 * (BN_U as u128) - 2;
/// Sign of 6u + 2, which follows u
pub(crate) const ATE_LOOP_IS_NEGATIVE: bool = BN_U_IS_NEGATIVE;

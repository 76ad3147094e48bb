// File: crates/algorithms/src/ec/mod.rs
//! Elliptic Curve Primitives
//!
//! Constant-time arithmetic on the pairing-friendly Barreto-Naehrig curve
//! Fp254BNb: the extension-field tower, the groups G1 and G2 and the
//! optimal-ate pairing.

pub mod bn254;

// Re-export types with consistent naming scheme.
pub use bn254::{
    pairing as bn254_pairing, G1Projective as Bn254G1, G2Projective as Bn254G2, Gt as Bn254Gt,
    Scalar as Bn254Scalar,
};

//! Pairing arithmetic for ISO 20008-2 group-signature mechanisms
//!
//! This crate implements the Fp254BNb Barreto-Naehrig curve: the field tower
//! Fq ⊂ Fq2 ⊂ Fq6 ⊂ Fq12 with double-precision accumulators, the curve groups
//! G1 and G2, and the optimal-ate pairing into Gt.
//!
//! # Features
//!
//! - Montgomery arithmetic with lazy reduction through `*Double` types
//! - Complete projective formulas with constant-time scalar multiplication
//! - Miller loop in mixed or affine coordinates, selected per engine
//! - A typed element pool that never leaks previous contents
//!
//! The entry point for most callers is [`PairingEngine`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[macro_use]
mod macros;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Elliptic curve and pairing arithmetic
pub mod ec;
pub use ec::bn254::{
    pairing, DomainParameters, Fp, Fp12, Fp2, Fp6, G1Affine, G1Projective, G2Affine,
    G2Prepared, G2Projective, Gt, MillerLoopResult, Scalar,
};

// Buffer pool
pub mod pool;
pub use pool::{ElementPool, PoolSlot};

// Engine and configuration
pub mod engine;
pub use engine::{EngineConfig, MillerLoopCoordinates, PairingEngine};

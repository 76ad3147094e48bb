//! # isopair
//!
//! A pairing engine for ISO 20008-2 group-signature mechanisms on the
//! Barreto-Naehrig curve Fp254BNb.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! isopair = "0.3"
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization of configuration and parameter types
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`isopair-api`]: field, group and pairing traits and the shared error type
//! - [`isopair-params`]: curve constants and encoding sizes
//! - [`isopair-algorithms`]: the field tower, G1, G2, the pairing and the engine
//!
//! ```
//! use isopair::prelude::*;
//!
//! let mut engine = PairingEngine::with_seed([7u8; 32]);
//! let a = engine.random_scalar();
//! let p = G1Affine::from(G1Affine::generator() * a);
//! let q = G2Affine::generator();
//!
//! // e(Q, [a]P) = e(Q, P)^a
//! assert_eq!(engine.pairing(&q, &p), Gt::generator().pow(&a));
//! ```

// Core re-exports (always available)
pub use isopair_algorithms as algorithms;
pub use isopair_api as api;
pub use isopair_params as params;

/// Common imports for isopair users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{CurveGroup, DoubleElement, Field, Pairing, Serialize};

    // Field tower
    pub use crate::algorithms::ec::bn254::{
        Fp, Fp12, Fp12Double, Fp2, Fp2Double, Fp6, Fp6Double, FpDouble,
    };

    // Groups and pairing
    pub use crate::algorithms::ec::bn254::{
        pairing, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar,
    };

    // Engine, configuration and pooling
    pub use crate::algorithms::{
        DomainParameters, ElementPool, EngineConfig, MillerLoopCoordinates, PairingEngine,
    };
}

//! Public API traits and types for the isopair pairing engine
//!
//! This crate provides the contract the group-signature layer programs
//! against: the per-level field traits, the curve-group and pairing traits,
//! and the error type shared by every other crate in the workspace.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};

// Re-export all traits from the traits module
pub use traits::{CurveGroup, DoubleElement, Field, Pairing, Serialize};

// Re-export trait modules for direct access
pub use traits::{field, group, pairing, serialize};

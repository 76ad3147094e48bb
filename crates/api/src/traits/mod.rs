//! Trait definitions for the pairing engine

pub mod field;
pub mod group;
pub mod pairing;
pub mod serialize;

pub use field::{DoubleElement, Field};
pub use group::CurveGroup;
pub use pairing::Pairing;
pub use serialize::Serialize;

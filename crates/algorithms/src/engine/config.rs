//! Engine configuration

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::ec::bn254::MillerLoopCoordinates;
use crate::pool::DEFAULT_POOL_CAPACITY;

/// Configuration for [`super::PairingEngine`].
///
/// Built with the `with_*` methods starting from [`EngineConfig::default`]:
///
/// ```
/// use isopair_algorithms::engine::{EngineConfig, MillerLoopCoordinates};
///
/// let config = EngineConfig::default()
///     .with_coordinates(MillerLoopCoordinates::Affine)
///     .with_seed([7u8; 32])
///     .with_pool_capacity(8);
/// assert_eq!(config.pool_capacity, 8);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Coordinates used to precompute Miller-loop lines
    pub coordinates: MillerLoopCoordinates,
    /// Fixed RNG seed; `None` seeds from the operating system
    pub seed: Option<[u8; 32]>,
    /// Recycled buffers kept per pool slot
    pub pool_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            coordinates: MillerLoopCoordinates::Mixed,
            seed: None,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

// The seed never reaches logs
impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("coordinates", &self.coordinates)
            .field("seed", &self.seed.map(|_| "<redacted>"))
            .field("pool_capacity", &self.pool_capacity)
            .finish()
    }
}

impl EngineConfig {
    /// Same as [`EngineConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the Miller-loop coordinates
    pub fn with_coordinates(mut self, coordinates: MillerLoopCoordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Use a deterministic RNG seed
    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound the number of recycled buffers per slot
    pub fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }
}

//! Pairing engine: the factory owning the RNG, the element pool and the
//! configuration.
//!
//! Every method that samples or touches the pool takes `&mut self`; share an
//! engine across threads only behind a lock, or give each thread its own.

mod config;

pub use config::{EngineConfig, MillerLoopCoordinates};

use isopair_api::{DoubleElement, Error as CoreError, Field, Pairing, Result as CoreResult};
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, instrument, trace};
use zeroize::Zeroize;

use crate::ec::bn254::{
    self, multi_miller_loop, DomainParameters, Fp, Fp2, G1Affine, G1Projective, G2Affine,
    G2Prepared, G2Projective, Gt, Scalar,
};
use crate::error::{to_core_result, validate};
use crate::pool::{ElementPool, PoolSlot};

/// Factory and evaluator for Fp254BNb pairings.
pub struct PairingEngine {
    config: EngineConfig,
    rng: ChaCha20Rng,
    pool: ElementPool,
}

impl Default for PairingEngine {
    fn default() -> Self {
        PairingEngine::new(EngineConfig::default())
    }
}

impl core::fmt::Debug for PairingEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PairingEngine")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PairingEngine {
    /// Build an engine; the RNG is seeded from `config.seed` or the OS.
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::from_seed(seed),
            None => {
                let mut seed = [0u8; 32];
                OsRng.fill_bytes(&mut seed);
                let rng = ChaCha20Rng::from_seed(seed);
                seed.zeroize();
                rng
            }
        };
        debug!(
            coordinates = %config.coordinates,
            seeded = config.seed.is_some(),
            pool_capacity = config.pool_capacity,
            "pairing engine created"
        );

        PairingEngine {
            pool: ElementPool::new(config.pool_capacity),
            config,
            rng,
        }
    }

    /// Engine with a deterministic RNG and default settings
    pub fn with_seed(seed: [u8; 32]) -> Self {
        PairingEngine::new(EngineConfig::default().with_seed(seed))
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Miller-loop coordinates in use
    pub fn coordinates(&self) -> MillerLoopCoordinates {
        self.config.coordinates
    }

    /// Shared element pool
    pub fn pool(&self) -> &ElementPool {
        &self.pool
    }

    /// Shared element pool, mutably
    pub fn pool_mut(&mut self) -> &mut ElementPool {
        &mut self.pool
    }

    /// Emit the pool counters at debug level.
    pub fn log_pool_statistics(&self) {
        debug!(
            hits = self.pool.hits(),
            misses = self.pool.misses(),
            "element pool statistics"
        );
    }

    /// Integer description of the curve
    pub fn domain_parameters() -> CoreResult<DomainParameters> {
        to_core_result(DomainParameters::fp254bnb(), "PairingEngine::domain_parameters")
    }

    // ------------------------------------------------------------------
    // Element factory
    // ------------------------------------------------------------------

    /// Uniformly random field element
    pub fn random_element<F: Field>(&mut self) -> F {
        F::random(&mut self.rng)
    }

    /// Multiplicative identity
    pub fn one<F: Field>(&self) -> F {
        F::one()
    }

    /// Additive identity
    pub fn zero<F: Field>(&self) -> F {
        F::zero()
    }

    /// Decode big-endian coefficients
    pub fn element_from_bytes<F: Field>(&self, bytes: &[u8]) -> CoreResult<F> {
        F::from_byte_array(bytes)
    }

    /// Build from integer components in serialization order
    pub fn element_from_components_u64<F: Field>(&self, components: &[u64]) -> CoreResult<F> {
        bn254::element_from_components_u64(components).map_err(CoreError::from)
    }

    /// Build from components written in `radix`, in serialization order
    pub fn element_from_components_str<F: Field>(
        &self,
        components: &[&str],
        radix: u32,
    ) -> CoreResult<F> {
        bn254::element_from_components_str(components, radix).map_err(CoreError::from)
    }

    /// Uniformly random scalar
    pub fn random_scalar(&mut self) -> Scalar {
        Scalar::random(&mut self.rng)
    }

    /// Random point of G₁
    pub fn random_g1(&mut self) -> G1Projective {
        G1Projective::random(&mut self.rng)
    }

    /// Random point of G₂
    pub fn random_g2(&mut self) -> G2Projective {
        G2Projective::random(&mut self.rng)
    }

    /// Random non-identity point of G₁
    pub fn random_generator_g1(&mut self) -> G1Projective {
        loop {
            let p = self.random_g1();
            if !bool::from(p.is_identity()) {
                return p;
            }
        }
    }

    /// Random non-identity point of G₂
    pub fn random_generator_g2(&mut self) -> G2Projective {
        loop {
            let p = self.random_g2();
            if !bool::from(p.is_identity()) {
                return p;
            }
        }
    }

    /// Random element of Gt
    pub fn random_gt(&mut self) -> Gt {
        Gt::random(&mut self.rng)
    }

    // ------------------------------------------------------------------
    // Pairings
    // ------------------------------------------------------------------

    /// Precompute the lines of `q` into a pooled buffer. Hand the result
    /// back with [`PairingEngine::recycle_prepared`].
    pub fn prepare(&mut self, q: &G2Affine) -> G2Prepared {
        let buf = self.pool.take(0);
        G2Prepared::with_buffer(q, self.config.coordinates, buf)
    }

    /// Return the coefficient buffer of a prepared point to the pool
    pub fn recycle_prepared(&mut self, prepared: G2Prepared) {
        self.pool.recycle(prepared.into_coeffs());
    }

    /// Π e(Qᵢ, Pᵢ) with one shared final exponentiation
    #[instrument(level = "trace", skip_all, fields(terms = terms.len()))]
    pub fn multi_pairing(&mut self, terms: &[(G1Affine, G2Affine)]) -> Gt {
        let prepared: Vec<G2Prepared> = terms.iter().map(|(_, q)| self.prepare(q)).collect();
        let refs: Vec<(&G1Affine, &G2Prepared)> = terms
            .iter()
            .zip(prepared.iter())
            .map(|((p, _), q)| (p, q))
            .collect();
        let result = multi_miller_loop(&refs).final_exponentiation();

        for q in prepared {
            self.recycle_prepared(q);
        }
        trace!(hits = self.pool.hits(), misses = self.pool.misses(), "pool after multi-pairing");
        result
    }

    // ------------------------------------------------------------------
    // Pooled helpers
    // ------------------------------------------------------------------

    /// Affine forms of many G₁ points with a single inversion
    pub fn batch_normalize_g1(&mut self, points: &[G1Projective]) -> CoreResult<Vec<G1Affine>> {
        let mut out = vec![G1Affine::identity(); points.len()];
        let mut scratch = self.pool.take::<Fp>(points.len());
        let res = G1Projective::batch_normalize(points, &mut out, &mut scratch);
        self.pool.recycle(scratch);
        res.map_err(CoreError::from)?;
        Ok(out)
    }

    /// Affine forms of many G₂ points with a single inversion
    pub fn batch_normalize_g2(&mut self, points: &[G2Projective]) -> CoreResult<Vec<G2Affine>> {
        let mut out = vec![G2Affine::identity(); points.len()];
        let mut scratch = self.pool.take::<Fp2>(points.len());
        let res = G2Projective::batch_normalize(points, &mut out, &mut scratch);
        self.pool.recycle(scratch);
        res.map_err(CoreError::from)?;
        Ok(out)
    }

    /// Σ aᵢ·bᵢ, accumulated unreduced and reduced once
    pub fn sum_of_products<F>(&mut self, a: &[F], b: &[F]) -> CoreResult<F>
    where
        F: Field + PoolSlot,
        F::Double: PoolSlot,
    {
        validate::length("sum_of_products", b.len(), a.len()).map_err(CoreError::from)?;

        let mut products = self.pool.take::<F::Double>(a.len());
        for ((slot, x), y) in products.iter_mut().zip(a).zip(b) {
            *slot = x.mul_double(y);
        }
        let acc = products
            .iter()
            .fold(F::Double::zero(), |acc, t| DoubleElement::add(&acc, t));
        self.pool.recycle(products);

        Ok(acc.reduce())
    }
}

impl Pairing for PairingEngine {
    type G1 = G1Affine;
    type G2 = G2Affine;
    type Gt = Gt;

    #[instrument(level = "trace", skip_all)]
    fn pairing(&mut self, q: &G2Affine, p: &G1Affine) -> Gt {
        trace!(coordinates = %self.config.coordinates, "pairing");
        let prepared = self.prepare(q);
        let result = multi_miller_loop(&[(p, &prepared)]).final_exponentiation();
        self.recycle_prepared(prepared);
        result
    }

    fn pairing_check(&mut self, terms: &[(G1Affine, G2Affine)]) -> bool {
        bool::from(self.multi_pairing(terms).is_identity())
    }

    /// e(A, X) = e(B, Y), checked as e(A, X)·e(-B, Y) = 1
    fn verify_equality(&mut self, a: &G1Affine, x: &G2Affine, b: &G1Affine, y: &G2Affine) -> bool {
        self.pairing_check(&[(*a, *x), (-b, *y)])
    }
}

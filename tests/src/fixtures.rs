// src/fixtures.rs

use isopair_algorithms::ec::bn254::{element_from_components_str, Fp12};
use isopair_algorithms::{EngineConfig, MillerLoopCoordinates, PairingEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// e(P2, P1) for the fixed generators, base-field coefficients in hex,
/// serialization order
pub const GENERATOR_PAIRING_HEX: [&str; 12] = [
    "fab4910966c09d05047db8e3b7d21737dbb9242632c07f24eb8881efaa88435",
    "2413a8182093a786c5db7fe7ed6b8c54d050cc338dcecfe1f3e0f705cc9a680b",
    "11e71cf508ee85006578af9820d1951b4dcca98dedf23dedc9ed3e797ef2bbc5",
    "21816628e1707091752f65b2eec3629f1f5d9a848e0a0276cca671cf42d3ab82",
    "14282650635e44352698729f3233b7a3b8aa22103650a1ed2d945af0b2c648e3",
    "ad1b6bc78cd9f9af5145942a3cdb7e7f1fe110e763d6b2e8e18897b2ee16fa7",
    "ff9baed59102d1a1d61963ebce82acb6a79cdd662b7515a7f5034fafd6ad15d",
    "136983b93b5ac3a4cabe06dde10d7b7146f47f8bf85ef4ecc32b9b0469b9b88a",
    "17e07fde69bb4034ccb25bed088e0d74e71365eeaec36faf31b94636aa1ee4b7",
    "11fc764d2cb86b64e1586cdd0966901c27f81f1ef17e2d91f5cd2cacd614e851",
    "10f323f3260171d171482264a4e74e1faf158ac4e5ae04c8fadfa9dc0d1bf6d",
    "21da404f4fe16f40a46515f9a24a196ba3c00db9a8597bf4e1de588b541e95eb",
];

/// Fp254BNb modulus q in hex
pub const MODULUS_HEX: &str = "2523648240000001ba344d80000000086121000000000013a700000000000013";

/// Order r of G1, G2 and Gt in hex
pub const ORDER_HEX: &str = "2523648240000001ba344d8000000007ff9f800000000010a10000000000000d";

/// The expected e(P2, P1) as an Fp12 element
pub fn generator_pairing() -> Fp12 {
    element_from_components_str(&GENERATOR_PAIRING_HEX, 16)
        .unwrap_or_else(|e| panic!("known-answer vector does not parse: {}", e))
}

/// ChaCha20 RNG expanded from a 64-bit seed
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Engine with a deterministic RNG and the requested Miller-loop coordinates
pub fn seeded_engine(seed: u64, coordinates: MillerLoopCoordinates) -> PairingEngine {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    PairingEngine::new(
        EngineConfig::new()
            .with_seed(bytes)
            .with_coordinates(coordinates),
    )
}

//! Domain parameters of the Fp254BNb Barreto-Naehrig curve
//!
//! All integers are canonical big-endian hex, not Montgomery form.

/// Size of a base-field coefficient in bytes
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an encoded Fp2 element in bytes
pub const FP2_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;

/// Size of an encoded Fp6 element in bytes
pub const FP6_SIZE: usize = 6 * FIELD_ELEMENT_SIZE;

/// Size of an encoded Fp12 element in bytes
pub const FP12_SIZE: usize = 12 * FIELD_ELEMENT_SIZE;

/// Size of an encoded scalar in bytes
pub const SCALAR_SIZE: usize = 32;

/// Size of a compressed G1 point in bytes
pub const G1_COMPRESSED_SIZE: usize = FIELD_ELEMENT_SIZE;

/// Size of an uncompressed G1 point in bytes
pub const G1_UNCOMPRESSED_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;

/// Size of a compressed G2 point in bytes
pub const G2_COMPRESSED_SIZE: usize = FP2_SIZE;

/// Size of an uncompressed G2 point in bytes
pub const G2_UNCOMPRESSED_SIZE: usize = 2 * FP2_SIZE;

/// Size of an encoded target-group element in bytes
pub const GT_SIZE: usize = FP12_SIZE;

/// Bit length of the base-field modulus
pub const MODULUS_BITS: u32 = 254;

/// Absolute value of the curve parameter u = -(2^62 + 2^55 + 1)
pub const BN_U: u64 = 0x4080000000000001;

/// Sign of the curve parameter u
pub const BN_U_IS_NEGATIVE: bool = true;

/// Base-field modulus q = 36u^4 + 36u^3 + 24u^2 + 6u + 1
pub const MODULUS_HEX: &str = "2523648240000001ba344d80000000086121000000000013a700000000000013";

/// Group order r = 36u^4 + 36u^3 + 18u^2 + 6u + 1
pub const ORDER_HEX: &str = "2523648240000001ba344d8000000007ff9f800000000010a10000000000000d";

/// Frobenius trace t = 6u^2 + 1
pub const TRACE_HEX: &str = "61818000000000030600000000000007";

/// Cofactor of the twist, 2q - r
pub const TWIST_COFACTOR_HEX: &str = "2523648240000001ba344d8000000008c2a2800000000016ad00000000000019";

/// Curve constant b of E: y^2 = x^3 + b
pub const CURVE_B: u64 = 2;

/// Twist constant b' = b / xi = 1 - u, as (c0, c1)
pub const TWIST_B_HEX: [&str; 2] = [
    "0000000000000000000000000000000000000000000000000000000000000001",
    "2523648240000001ba344d80000000086121000000000013a700000000000012",
];

/// Generator of G1, (x, y) = (-1, 1)
pub const G1_GENERATOR_HEX: [&str; 2] = [
    "2523648240000001ba344d80000000086121000000000013a700000000000012",
    "0000000000000000000000000000000000000000000000000000000000000001",
];

/// Generator of G2, (x.c0, x.c1, y.c0, y.c1)
pub const G2_GENERATOR_HEX: [&str; 4] = [
    "0709c6776299080ba18b8f699e70e6ea3c281d9a853a5c75e1938b07d677f1de",
    "2420e103b8df886de081595f9795b931998398a2d278bad5fb6a35bf403535fb",
    "1992944021f29b925198db9e159644b699a2c693ce31cd98d6030ff1ed60bc86",
    "1c8acce0f670e50c48c233032bba28de24ee0057af696853299833807fe32fb7",
];

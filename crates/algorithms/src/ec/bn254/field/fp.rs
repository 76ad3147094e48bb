//! Fp254BNb base field `GF(q)` where q = 0x2523648240000001ba344d80000000086121000000000013a700000000000013

// Standard library imports
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

// External crate imports
use isopair_api::{DoubleElement, Error as CoreError, Field, Result as CoreResult};
use num_bigint::BigUint;
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::{adc, mac, sbb};
use crate::error::{validate, Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Field modulus q as 4×64-bit limbs (little-endian)
pub(crate) const MODULUS: [u64; 4] = [
    0xa700_0000_0000_0013,
    0x6121_0000_0000_0013,
    0xba34_4d80_0000_0008,
    0x2523_6482_4000_0001,
];

/// INV = -(q^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x0843_5e50_d794_35e5;

/// R = 2^256 mod q
const R: Fp = Fp([
    0x15ff_ffff_ffff_ff8e,
    0xb939_ffff_ffff_ff8a,
    0xa2c6_2eff_ffff_ffcd,
    0x212b_a4f2_7fff_fff5,
]);

/// R^2 = 2^512 mod q
const R2: Fp = Fp([
    0xb3e8_8674_5370_473d,
    0x55ef_bf6e_8c1c_c3f1,
    0x281e_3a1b_7f86_954f,
    0x1b0a_32fd_f640_3a3d,
]);

/// R^3 = 2^768 mod q
const R3: Fp = Fp([
    0x631b_7e41_1531_f6df,
    0x5130_4798_39e3_dc8c,
    0x69a1_e2b1_33d5_9539,
    0x1082_4852_757f_dc0a,
]);

/// q - 2, the Fermat inversion exponent
const Q_MINUS_2: [u64; 4] = [
    0xa700_0000_0000_0011,
    0x6121_0000_0000_0013,
    0xba34_4d80_0000_0008,
    0x2523_6482_4000_0001,
];

/// (q + 1) / 4, the square-root exponent for q ≡ 3 (mod 4)
const SQRT_EXP: [u64; 4] = [
    0xe9c0_0000_0000_0005,
    0x1848_4000_0000_0004,
    0x6e8d_1360_0000_0002,
    0x0948_d920_9000_0000,
];

/// (q - 1) / 2, the Euler criterion exponent
pub(crate) const LEGENDRE_EXP: [u64; 4] = [
    0xd380_0000_0000_0009,
    0x3090_8000_0000_0009,
    0xdd1a_26c0_0000_0004,
    0x1291_b241_2000_0000,
];

/// (q - 3) / 4, used by the Fp2 square root
pub(crate) const Q_MINUS_3_DIV_4: [u64; 4] = [
    0xe9c0_0000_0000_0004,
    0x1848_4000_0000_0004,
    0x6e8d_1360_0000_0002,
    0x0948_d920_9000_0000,
];

/// Encoded size in bytes
pub const FP_BYTES: usize = isopair_params::pairing::bn254::FIELD_ELEMENT_SIZE;

// ============================================================================
// Core Field Element Type
// ============================================================================

/// Element of the base field, four 64-bit limbs in little-endian Montgomery form.
/// Always canonical: the represented integer lies in [0, q).
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 4]);

/// Unreduced product of two base-field elements.
///
/// Holds a 512-bit integer T with 0 <= T < q * 2^256 standing for T / R^2 mod q,
/// so that sums and differences of products can be accumulated before a single
/// Montgomery reduction.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct FpDouble(pub(crate) [u64; 8]);

// ============================================================================
// Internal Helpers
// ============================================================================

impl Fp {
    /// Subtract q if the value is >= q
    #[inline]
    const fn subtract_p(&self) -> Fp {
        let (r0, borrow) = sbb(self.0[0], MODULUS[0], 0);
        let (r1, borrow) = sbb(self.0[1], MODULUS[1], borrow);
        let (r2, borrow) = sbb(self.0[2], MODULUS[2], borrow);
        let (r3, borrow) = sbb(self.0[3], MODULUS[3], borrow);

        // Borrow mask: all ones if the subtraction underflowed
        let r0 = (self.0[0] & borrow) | (r0 & !borrow);
        let r1 = (self.0[1] & borrow) | (r1 & !borrow);
        let r2 = (self.0[2] & borrow) | (r2 & !borrow);
        let r3 = (self.0[3] & borrow) | (r3 & !borrow);

        Fp([r0, r1, r2, r3])
    }

    /// Schoolbook 4×4 product, unreduced
    #[inline]
    const fn multiply_impl(&self, rhs: &Fp) -> [u64; 8] {
        let (r0, carry) = mac(0, self.0[0], rhs.0[0], 0);
        let (r1, carry) = mac(0, self.0[0], rhs.0[1], carry);
        let (r2, carry) = mac(0, self.0[0], rhs.0[2], carry);
        let (r3, r4) = mac(0, self.0[0], rhs.0[3], carry);

        let (r1, carry) = mac(r1, self.0[1], rhs.0[0], 0);
        let (r2, carry) = mac(r2, self.0[1], rhs.0[1], carry);
        let (r3, carry) = mac(r3, self.0[1], rhs.0[2], carry);
        let (r4, r5) = mac(r4, self.0[1], rhs.0[3], carry);

        let (r2, carry) = mac(r2, self.0[2], rhs.0[0], 0);
        let (r3, carry) = mac(r3, self.0[2], rhs.0[1], carry);
        let (r4, carry) = mac(r4, self.0[2], rhs.0[2], carry);
        let (r5, r6) = mac(r5, self.0[2], rhs.0[3], carry);

        let (r3, carry) = mac(r3, self.0[3], rhs.0[0], 0);
        let (r4, carry) = mac(r4, self.0[3], rhs.0[1], carry);
        let (r5, carry) = mac(r5, self.0[3], rhs.0[2], carry);
        let (r6, r7) = mac(r6, self.0[3], rhs.0[3], carry);

        [r0, r1, r2, r3, r4, r5, r6, r7]
    }

    /// Squaring with the off-diagonal products computed once
    #[inline]
    const fn square_impl(&self) -> [u64; 8] {
        let (r1, carry) = mac(0, self.0[0], self.0[1], 0);
        let (r2, carry) = mac(0, self.0[0], self.0[2], carry);
        let (r3, r4) = mac(0, self.0[0], self.0[3], carry);

        let (r3, carry) = mac(r3, self.0[1], self.0[2], 0);
        let (r4, r5) = mac(r4, self.0[1], self.0[3], carry);

        let (r5, r6) = mac(r5, self.0[2], self.0[3], 0);

        let r7 = r6 >> 63;
        let r6 = (r6 << 1) | (r5 >> 63);
        let r5 = (r5 << 1) | (r4 >> 63);
        let r4 = (r4 << 1) | (r3 >> 63);
        let r3 = (r3 << 1) | (r2 >> 63);
        let r2 = (r2 << 1) | (r1 >> 63);
        let r1 = r1 << 1;

        let (r0, carry) = mac(0, self.0[0], self.0[0], 0);
        let (r1, carry) = adc(0, r1, carry);
        let (r2, carry) = mac(r2, self.0[1], self.0[1], carry);
        let (r3, carry) = adc(0, r3, carry);
        let (r4, carry) = mac(r4, self.0[2], self.0[2], carry);
        let (r5, carry) = adc(0, r5, carry);
        let (r6, carry) = mac(r6, self.0[3], self.0[3], carry);
        let (r7, _) = adc(0, r7, carry);

        [r0, r1, r2, r3, r4, r5, r6, r7]
    }

    /// Lexicographic comparison against (q - 1) / 2
    #[inline]
    fn is_lexicographically_largest(&self) -> bool {
        let tmp = Fp::montgomery_reduce(self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0);

        // (q - 1) / 2 + 1: the smallest "largest" value
        let (_, borrow) = sbb(tmp.0[0], LEGENDRE_EXP[0].wrapping_add(1), 0);
        let (_, borrow) = sbb(tmp.0[1], LEGENDRE_EXP[1], borrow);
        let (_, borrow) = sbb(tmp.0[2], LEGENDRE_EXP[2], borrow);
        let (_, borrow) = sbb(tmp.0[3], LEGENDRE_EXP[3], borrow);

        // No borrow means tmp >= (q + 1) / 2
        borrow == 0
    }
}

// ============================================================================
// Public Constructors and Basic Operations
// ============================================================================

impl Fp {
    /// Zero element
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0, 0, 0, 0])
    }

    /// One element (Montgomery form)
    #[inline]
    pub const fn one() -> Fp {
        R
    }

    /// Check if zero
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fp::zero())
    }

    /// Create from raw Montgomery limbs (unchecked)
    pub const fn from_raw_unchecked(v: [u64; 4]) -> Fp {
        Fp(v)
    }

    /// Create from integer limbs (little-endian), converting to Montgomery form.
    /// The integer may be any 256-bit value; it is reduced mod q.
    pub const fn from_raw(v: [u64; 4]) -> Fp {
        (&Fp(v)).mul(&R2)
    }

    /// Create from a small integer
    pub const fn from_u64(v: u64) -> Fp {
        Fp::from_raw([v, 0, 0, 0])
    }

    /// Add two field elements
    #[inline]
    pub const fn add(&self, rhs: &Fp) -> Fp {
        let (d0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (d1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (d2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (d3, _) = adc(self.0[3], rhs.0[3], carry);

        // q < 2^254, so the sum fits in four limbs
        (&Fp([d0, d1, d2, d3])).subtract_p()
    }

    /// Subtract field elements
    #[inline]
    pub const fn sub(&self, rhs: &Fp) -> Fp {
        let (d0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

        let (d0, carry) = adc(d0, MODULUS[0] & borrow, 0);
        let (d1, carry) = adc(d1, MODULUS[1] & borrow, carry);
        let (d2, carry) = adc(d2, MODULUS[2] & borrow, carry);
        let (d3, _) = adc(d3, MODULUS[3] & borrow, carry);

        Fp([d0, d1, d2, d3])
    }

    /// Negate a field element
    #[inline]
    pub const fn neg(&self) -> Fp {
        let (d0, borrow) = sbb(MODULUS[0], self.0[0], 0);
        let (d1, borrow) = sbb(MODULUS[1], self.0[1], borrow);
        let (d2, borrow) = sbb(MODULUS[2], self.0[2], borrow);
        let (d3, _) = sbb(MODULUS[3], self.0[3], borrow);

        // Mask if zero
        let mask = (((self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0) as u64).wrapping_sub(1);

        Fp([d0 & mask, d1 & mask, d2 & mask, d3 & mask])
    }

    /// Double this element
    #[inline]
    pub const fn double(&self) -> Fp {
        self.add(self)
    }

    /// Multiply two field elements
    #[inline]
    pub const fn mul(&self, rhs: &Fp) -> Fp {
        let t = self.multiply_impl(rhs);
        Fp::montgomery_reduce(t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7])
    }

    /// Square this element
    #[inline]
    pub const fn square(&self) -> Fp {
        let t = self.square_impl();
        Fp::montgomery_reduce(t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7])
    }

    /// Product without the Montgomery reduction
    #[inline]
    pub const fn mul_unreduced(&self, rhs: &Fp) -> FpDouble {
        FpDouble(self.multiply_impl(rhs))
    }

    /// Square without the Montgomery reduction
    #[inline]
    pub const fn square_unreduced(&self) -> FpDouble {
        FpDouble(self.square_impl())
    }

    /// Halve this element: shift, adding q first when odd
    #[inline]
    pub const fn div_by_two(&self) -> Fp {
        let mask = (self.0[0] & 1).wrapping_neg();
        let (d0, carry) = adc(self.0[0], MODULUS[0] & mask, 0);
        let (d1, carry) = adc(self.0[1], MODULUS[1] & mask, carry);
        let (d2, carry) = adc(self.0[2], MODULUS[2] & mask, carry);
        let (d3, _) = adc(self.0[3], MODULUS[3] & mask, carry);

        Fp([
            (d0 >> 1) | (d1 << 63),
            (d1 >> 1) | (d2 << 63),
            (d2 >> 1) | (d3 << 63),
            d3 >> 1,
        ])
    }

    /// Quarter this element
    #[inline]
    pub const fn div_by_four(&self) -> Fp {
        self.div_by_two().div_by_two()
    }

    /// Montgomery reduction of a 512-bit value T < q * 2^256
    #[inline(always)]
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn montgomery_reduce(
        r0: u64,
        r1: u64,
        r2: u64,
        r3: u64,
        r4: u64,
        r5: u64,
        r6: u64,
        r7: u64,
    ) -> Fp {
        let k = r0.wrapping_mul(INV);
        let (_, carry) = mac(r0, k, MODULUS[0], 0);
        let (r1, carry) = mac(r1, k, MODULUS[1], carry);
        let (r2, carry) = mac(r2, k, MODULUS[2], carry);
        let (r3, carry) = mac(r3, k, MODULUS[3], carry);
        let (r4, carry2) = adc(r4, 0, carry);

        let k = r1.wrapping_mul(INV);
        let (_, carry) = mac(r1, k, MODULUS[0], 0);
        let (r2, carry) = mac(r2, k, MODULUS[1], carry);
        let (r3, carry) = mac(r3, k, MODULUS[2], carry);
        let (r4, carry) = mac(r4, k, MODULUS[3], carry);
        let (r5, carry2) = adc(r5, carry2, carry);

        let k = r2.wrapping_mul(INV);
        let (_, carry) = mac(r2, k, MODULUS[0], 0);
        let (r3, carry) = mac(r3, k, MODULUS[1], carry);
        let (r4, carry) = mac(r4, k, MODULUS[2], carry);
        let (r5, carry) = mac(r5, k, MODULUS[3], carry);
        let (r6, carry2) = adc(r6, carry2, carry);

        let k = r3.wrapping_mul(INV);
        let (_, carry) = mac(r3, k, MODULUS[0], 0);
        let (r4, carry) = mac(r4, k, MODULUS[1], carry);
        let (r5, carry) = mac(r5, k, MODULUS[2], carry);
        let (r6, carry) = mac(r6, k, MODULUS[3], carry);
        let (r7, _) = adc(r7, carry2, carry);

        (&Fp([r4, r5, r6, r7])).subtract_p()
    }
}

// ============================================================================
// Advanced Field Operations
// ============================================================================

impl Fp {
    /// Variable-time exponentiation by a 256-bit little-endian exponent
    pub fn pow_vartime(&self, by: &[u64; 4]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Square root, a^((q+1)/4) since q ≡ 3 (mod 4)
    pub fn sqrt(&self) -> CtOption<Self> {
        let sqrt = self.pow_vartime(&SQRT_EXP);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Multiplicative inverse by Fermat's little theorem
    pub fn invert(&self) -> CtOption<Self> {
        let t = self.pow_vartime(&Q_MINUS_2);
        CtOption::new(t, !self.is_zero())
    }

    /// Euler criterion: 0 for zero, 1 for a non-zero square, -1 otherwise
    pub fn legendre(&self) -> i8 {
        let s = self.pow_vartime(&LEGENDRE_EXP);
        if bool::from(s.is_zero()) {
            0
        } else if s == Fp::one() {
            1
        } else {
            -1
        }
    }

    /// Check if lexicographically largest
    pub fn lexicographically_largest(&self) -> Choice {
        Choice::from(self.is_lexicographically_largest() as u8)
    }

    /// The modulus q as a big integer
    pub fn modulus_biguint() -> BigUint {
        let mut bytes = [0u8; FP_BYTES];
        for (i, limb) in MODULUS.iter().rev().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        BigUint::from_bytes_be(&bytes)
    }

    /// The canonical integer value
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Fp {
    /// Create from big-endian bytes if canonical
    pub fn from_bytes(bytes: &[u8; FP_BYTES]) -> CtOption<Fp> {
        let mut tmp = Fp([0, 0, 0, 0]);
        for (i, limb) in tmp.0.iter_mut().rev().enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *limb = u64::from_be_bytes(word);
        }

        // Canonical iff tmp < q
        let (_, borrow) = sbb(tmp.0[0], MODULUS[0], 0);
        let (_, borrow) = sbb(tmp.0[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(tmp.0[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(tmp.0[3], MODULUS[3], borrow);

        let is_some = (borrow as u8) & 1;

        // Convert to Montgomery: (a * R^2) / R = aR
        tmp = tmp.mul(&R2);

        CtOption::new(tmp, Choice::from(is_some))
    }

    /// Parse a 32-byte big-endian slice, rejecting other lengths and values >= q
    pub fn from_slice(bytes: &[u8]) -> Result<Fp> {
        validate::length("Fp::from_slice", bytes.len(), FP_BYTES)?;
        let mut array = [0u8; FP_BYTES];
        array.copy_from_slice(bytes);
        Option::from(Fp::from_bytes(&array))
            .ok_or_else(|| Error::param("Fp::from_slice", "coefficient not below the modulus"))
    }

    /// Convert to big-endian bytes
    pub fn to_bytes(self) -> [u8; FP_BYTES] {
        // Remove Montgomery: (aR) / R = a
        let tmp = Fp::montgomery_reduce(self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0);

        let mut res = [0; FP_BYTES];
        for (i, limb) in tmp.0.iter().rev().enumerate() {
            res[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        res
    }

    /// Uniformly random element from 512 random bits
    pub fn random(mut rng: impl RngCore) -> Fp {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);

        let mut limbs = [0u64; 8];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *limb = u64::from_le_bytes(word);
        }
        Fp::from_u512(limbs)
    }

    /// Reduce a 512-bit integer mod q
    fn from_u512(limbs: [u64; 8]) -> Fp {
        let d0 = Fp([limbs[0], limbs[1], limbs[2], limbs[3]]);
        let d1 = Fp([limbs[4], limbs[5], limbs[6], limbs[7]]);
        // Convert to Montgomery form
        d0.mul(&R2).add(&d1.mul(&R3))
    }
}

// ============================================================================
// Double-precision accumulator
// ============================================================================

impl FpDouble {
    /// Zero accumulator
    #[inline]
    pub const fn zero() -> FpDouble {
        FpDouble([0; 8])
    }

    /// Plain 512-bit addition. Caller keeps the sum below q * 2^256.
    #[inline]
    pub const fn add_no_reduction(&self, rhs: &FpDouble) -> FpDouble {
        let (d0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (d1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (d2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (d3, carry) = adc(self.0[3], rhs.0[3], carry);
        let (d4, carry) = adc(self.0[4], rhs.0[4], carry);
        let (d5, carry) = adc(self.0[5], rhs.0[5], carry);
        let (d6, carry) = adc(self.0[6], rhs.0[6], carry);
        let (d7, _) = adc(self.0[7], rhs.0[7], carry);

        FpDouble([d0, d1, d2, d3, d4, d5, d6, d7])
    }

    /// Sum, subtracting q * 2^256 when the upper half reaches q
    #[inline]
    pub const fn add(&self, rhs: &FpDouble) -> FpDouble {
        let sum = self.add_no_reduction(rhs);

        let (u0, borrow) = sbb(sum.0[4], MODULUS[0], 0);
        let (u1, borrow) = sbb(sum.0[5], MODULUS[1], borrow);
        let (u2, borrow) = sbb(sum.0[6], MODULUS[2], borrow);
        let (u3, borrow) = sbb(sum.0[7], MODULUS[3], borrow);

        // Keep the original upper half if it was below q
        FpDouble([
            sum.0[0],
            sum.0[1],
            sum.0[2],
            sum.0[3],
            (sum.0[4] & borrow) | (u0 & !borrow),
            (sum.0[5] & borrow) | (u1 & !borrow),
            (sum.0[6] & borrow) | (u2 & !borrow),
            (sum.0[7] & borrow) | (u3 & !borrow),
        ])
    }

    /// Difference, adding q * 2^256 on underflow
    #[inline]
    pub const fn sub(&self, rhs: &FpDouble) -> FpDouble {
        let (d0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);
        let (d4, borrow) = sbb(self.0[4], rhs.0[4], borrow);
        let (d5, borrow) = sbb(self.0[5], rhs.0[5], borrow);
        let (d6, borrow) = sbb(self.0[6], rhs.0[6], borrow);
        let (d7, borrow) = sbb(self.0[7], rhs.0[7], borrow);

        let (d4, carry) = adc(d4, MODULUS[0] & borrow, 0);
        let (d5, carry) = adc(d5, MODULUS[1] & borrow, carry);
        let (d6, carry) = adc(d6, MODULUS[2] & borrow, carry);
        let (d7, _) = adc(d7, MODULUS[3] & borrow, carry);

        FpDouble([d0, d1, d2, d3, d4, d5, d6, d7])
    }

    /// Twice the accumulator
    #[inline]
    pub const fn double(&self) -> FpDouble {
        self.add(self)
    }

    /// Negation, q * 2^256 - T
    #[inline]
    pub const fn neg(&self) -> FpDouble {
        FpDouble::zero().sub(self)
    }

    /// Montgomery reduction to a canonical element
    #[inline]
    pub const fn reduce(&self) -> Fp {
        Fp::montgomery_reduce(
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5], self.0[6],
            self.0[7],
        )
    }
}

impl zeroize::DefaultIsZeroes for FpDouble {}

impl fmt::Debug for FpDouble {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FpDouble({:?})", self.reduce())
    }
}

impl DoubleElement for FpDouble {
    type Single = Fp;

    fn zero() -> Self {
        FpDouble::zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        FpDouble::add(self, rhs)
    }

    fn sub(&self, rhs: &Self) -> Self {
        FpDouble::sub(self, rhs)
    }

    fn add_no_reduction(&self, rhs: &Self) -> Self {
        FpDouble::add_no_reduction(self, rhs)
    }

    fn reduce(&self) -> Fp {
        FpDouble::reduce(self)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl From<u64> for Fp {
    fn from(val: u64) -> Fp {
        Fp::from_u64(val)
    }
}

// Operator implementations
impl<'a> Neg for &'a Fp {
    type Output = Fp;

    #[inline]
    fn neg(self) -> Fp {
        self.neg()
    }
}

impl<'a, 'b> Sub<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp {
        self.mul(rhs)
    }
}

impl_neg_owned!(Fp);
impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);

impl Field for Fp {
    type Double = FpDouble;

    const DEGREE: usize = 1;
    const COEFFICIENT_SIZE: usize = FP_BYTES;

    fn zero() -> Self {
        Fp::zero()
    }

    fn one() -> Self {
        Fp::one()
    }

    fn is_zero(&self) -> bool {
        bool::from(Fp::is_zero(self))
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Fp::random(rng)
    }

    fn square(&self) -> Self {
        Fp::square(self)
    }

    fn double(&self) -> Self {
        Fp::double(self)
    }

    fn invert(&self) -> CoreResult<Self> {
        Option::from(Fp::invert(self))
            .ok_or_else(|| CoreError::from(Error::param("Fp::invert", "zero has no inverse")))
    }

    fn sqrt(&self) -> CoreResult<Self> {
        Option::from(Fp::sqrt(self)).ok_or_else(|| {
            CoreError::from(Error::param("Fp::sqrt", "element is not a quadratic residue"))
        })
    }

    fn div_by_two(&self) -> Self {
        Fp::div_by_two(self)
    }

    fn div_by_four(&self) -> Self {
        Fp::div_by_four(self)
    }

    fn mul_double(&self, rhs: &Self) -> FpDouble {
        self.mul_unreduced(rhs)
    }

    fn square_double(&self) -> FpDouble {
        self.square_unreduced()
    }

    fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }

    fn to_byte_array(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_byte_array(bytes: &[u8]) -> CoreResult<Self> {
        Fp::from_slice(bytes).map_err(CoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inv() {
        // Verify INV constant
        let mut inv = 1u64;
        for _ in 0..63 {
            inv = inv.wrapping_mul(inv);
            inv = inv.wrapping_mul(MODULUS[0]);
        }
        inv = inv.wrapping_neg();
        assert_eq!(inv, INV);
    }

    #[test]
    fn test_montgomery_constants() {
        assert_eq!(Fp::from_raw([1, 0, 0, 0]), R);
        assert_eq!(Fp::from_raw(R.0), R2);
        assert_eq!(Fp::from_raw(R2.0), R3);
        assert_eq!(Fp::from_u64(2).double(), Fp::from_u64(4));
        assert_eq!(Fp::modulus_biguint().bits(), 254);
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", Fp::one()),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            format!("{:?}", -Fp::one()),
            "0x2523648240000001ba344d80000000086121000000000013a700000000000012"
        );
    }

    #[test]
    fn test_double_accumulator_bounds() {
        // (q-1)^2 is the largest product; sums and differences of such values
        // must reduce like their single-precision counterparts.
        let m = -Fp::one();
        let big = m.mul_unreduced(&m);
        assert_eq!(big.reduce(), Fp::one());
        assert_eq!(big.add(&big).reduce(), Fp::from_u64(2));
        assert_eq!(FpDouble::zero().sub(&big).reduce(), -Fp::one());
        assert_eq!(big.neg().add(&big), FpDouble::zero());
        assert_eq!(big.sub(&big).reduce(), Fp::zero());
    }

    #[test]
    fn test_div_by_two() {
        let three = Fp::from_u64(3);
        assert_eq!(three.div_by_two().double(), three);
        assert_eq!(three.div_by_four() * Fp::from_u64(4), three);
        assert_eq!(Fp::zero().div_by_two(), Fp::zero());
    }
}

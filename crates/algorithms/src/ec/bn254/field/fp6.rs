//! Cubic extension Fp6 = Fp2[v]/(v^3 - xi), xi = 1 + u

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use isopair_api::{DoubleElement, Error as CoreError, Field, Result as CoreResult};
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::{Fp, FP_BYTES};
use super::fp2::{Fp2, Fp2Double, FP2_BYTES};
use super::tonelli_shanks;
use crate::error::{validate, Error, Result};

/// Encoded size in bytes
pub const FP6_BYTES: usize = 3 * FP2_BYTES;

/// xi^((q^k - 1) / 3) for k = 1, 2, 3
const FROBENIUS_COEFF_C1: [Fp2; 3] = [
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x056e_fc68_e869_fd55,
            0x1c92_2091_38d7_ba61,
            0xc065_1cd3_594d_6466,
            0x22a8_7deb_bfff_ffef,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x3291_0397_1796_0343,
            0xec75_df6e_c728_463c,
            0x113d_4f2c_a6b2_9bdc,
            0x0672_a626_4000_001e,
        ]),
        c1: Fp::zero(),
    },
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x15ff_ffff_ffff_ff8e,
            0xb939_ffff_ffff_ff8a,
            0xa2c6_2eff_ffff_ffcd,
            0x212b_a4f2_7fff_fff5,
        ]),
    },
];

/// xi^(2(q^k - 1) / 3) for k = 1, 2, 3
const FROBENIUS_COEFF_C2: [Fp2; 3] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x746e_fc68_e869_fcd0,
            0x74ab_2091_38d7_b9d7,
            0xa8f6_fe53_594d_642b,
            0x1eb0_be5b_ffff_ffe3,
        ]),
        c1: Fp::zero(),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x056e_fc68_e869_fd55,
            0x1c92_2091_38d7_ba61,
            0xc065_1cd3_594d_6466,
            0x22a8_7deb_bfff_ffef,
        ]),
        c1: Fp::zero(),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x9100_0000_0000_0085,
            0xa7e7_0000_0000_0089,
            0x176e_1e80_0000_003a,
            0x03f7_bf8f_c000_000c,
        ]),
        c1: Fp::zero(),
    },
];

/// Element c0 + c1 * v + c2 * v^2
#[derive(Copy, Clone, Debug)]
pub struct Fp6 {
    /// Constant coefficient
    pub c0: Fp2,
    /// Coefficient of v
    pub c1: Fp2,
    /// Coefficient of v^2
    pub c2: Fp2,
}

/// Unreduced Fp6 product
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fp6Double {
    /// Constant coefficient
    pub c0: Fp2Double,
    /// Coefficient of v
    pub c1: Fp2Double,
    /// Coefficient of v^2
    pub c2: Fp2Double,
}

impl From<Fp> for Fp6 {
    fn from(f: Fp) -> Fp6 {
        Fp6::from(Fp2::from(f))
    }
}

impl From<Fp2> for Fp6 {
    fn from(f: Fp2) -> Fp6 {
        Fp6 {
            c0: f,
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }
}

impl PartialEq for Fp6 {
    fn eq(&self, other: &Fp6) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp6 {}

impl Default for Fp6 {
    fn default() -> Self {
        Fp6::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp6 {}
impl zeroize::DefaultIsZeroes for Fp6Double {}

impl fmt::Display for Fp6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + ({})*v + ({})*v^2", self.c0, self.c1, self.c2)
    }
}

impl ConditionallySelectable for Fp6 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp6 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl ConstantTimeEq for Fp6 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl Fp6 {
    /// Zero element
    #[inline]
    pub const fn zero() -> Self {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// One element
    #[inline]
    pub const fn one() -> Self {
        Fp6 {
            c0: Fp2::one(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// The generator v, a quadratic non-residue
    #[inline]
    pub const fn v() -> Self {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::one(),
            c2: Fp2::zero(),
        }
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp6 {
            c0: Fp2::random(&mut rng),
            c1: Fp2::random(&mut rng),
            c2: Fp2::random(&mut rng),
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// Sparse product by c0 + c1 * v
    pub fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Fp6 {
        let a_a = self.c0.mul_unreduced(c0);
        let b_b = self.c1.mul_unreduced(c1);

        let t1 = self.c2.mul_unreduced(c1).mul_xi_add(&a_a);
        let t2 = (c0 + c1)
            .mul_unreduced(&(self.c0 + self.c1))
            .sub(&a_a)
            .sub(&b_b);
        let t3 = self.c2.mul_unreduced(c0).add(&b_b);

        Fp6 {
            c0: t1.reduce(),
            c1: t2.reduce(),
            c2: t3.reduce(),
        }
    }

    /// Sparse product by c1 * v
    pub fn mul_by_1(&self, c1: &Fp2) -> Fp6 {
        Fp6 {
            c0: (self.c2 * c1).mul_by_xi(),
            c1: self.c0 * c1,
            c2: self.c1 * c1,
        }
    }

    /// Multiply by v: (c0, c1, c2) -> (xi * c2, c0, c1)
    #[inline(always)]
    pub fn mul_by_v(&self) -> Self {
        Fp6 {
            c0: self.c2.mul_by_xi(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Multiply every coefficient by an Fp2 element
    pub fn mul_by_fp2(&self, k: &Fp2) -> Self {
        Fp6 {
            c0: self.c0 * k,
            c1: self.c1 * k,
            c2: self.c2 * k,
        }
    }

    /// x -> x^(q^k) for k = 1, 2, 3
    fn frobenius_step(&self, k: usize) -> Self {
        debug_assert!((1..=3).contains(&k));
        let (c0, c1, c2) = if k % 2 == 1 {
            (self.c0.conjugate(), self.c1.conjugate(), self.c2.conjugate())
        } else {
            (self.c0, self.c1, self.c2)
        };

        Fp6 {
            c0,
            c1: c1 * FROBENIUS_COEFF_C1[k - 1],
            c2: c2 * FROBENIUS_COEFF_C2[k - 1],
        }
    }

    /// x -> x^(q^power), composed from the literal tables
    pub fn frobenius_map(&self, power: usize) -> Self {
        let mut res = *self;
        let mut k = power % 6;
        while k > 0 {
            let step = k.min(3);
            res = res.frobenius_step(step);
            k -= step;
        }
        res
    }

    /// Three-term Karatsuba left unreduced
    pub fn mul_unreduced(&self, b: &Self) -> Fp6Double {
        let t0 = self.c0.mul_unreduced(&b.c0);
        let t1 = self.c1.mul_unreduced(&b.c1);
        let t2 = self.c2.mul_unreduced(&b.c2);

        let c0 = (self.c1 + self.c2)
            .mul_unreduced(&(b.c1 + b.c2))
            .sub(&t1)
            .sub(&t2)
            .mul_xi_add(&t0);
        let c1 = t2.mul_xi_add(
            &(self.c0 + self.c1)
                .mul_unreduced(&(b.c0 + b.c1))
                .sub(&t0)
                .sub(&t1),
        );
        let c2 = (self.c0 + self.c2)
            .mul_unreduced(&(b.c0 + b.c2))
            .sub(&t0)
            .sub(&t2)
            .add(&t1);

        Fp6Double { c0, c1, c2 }
    }

    /// Chung-Hasan SQR2 left unreduced
    pub fn square_unreduced(&self) -> Fp6Double {
        let s0 = self.c0.square_unreduced();
        let s1 = self.c0.double().mul_unreduced(&self.c1);
        let s2 = (self.c0 - self.c1 + self.c2).square_unreduced();
        let s3 = self.c1.double().mul_unreduced(&self.c2);
        let s4 = self.c2.square_unreduced();

        Fp6Double {
            c0: s3.mul_xi_add(&s0),
            c1: s4.mul_xi_add(&s1),
            c2: s1.add(&s2).add(&s3).sub(&s0).sub(&s4),
        }
    }

    /// Square element
    #[inline]
    pub fn square(&self) -> Self {
        self.square_unreduced().reduce()
    }

    /// Inverse by the adjugate formula
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        let c0 = self.c1.mul_unreduced(&self.c2).neg().mul_by_xi().add(&self.c0.square_unreduced());
        let c1 = self.c2.square_unreduced().mul_xi_add(&self.c0.mul_unreduced(&self.c1).neg());
        let c2 = self.c1.square_unreduced().sub(&self.c0.mul_unreduced(&self.c2));
        let (c0, c1, c2) = (c0.reduce(), c1.reduce(), c2.reduce());

        let tmp = self
            .c1
            .mul_unreduced(&c2)
            .add(&self.c2.mul_unreduced(&c1))
            .mul_xi_add(&self.c0.mul_unreduced(&c0))
            .reduce();

        tmp.invert().map(|t| Fp6 {
            c0: t * c0,
            c1: t * c1,
            c2: t * c2,
        })
    }

    /// Square root by Tonelli-Shanks with the non-residue v
    pub fn sqrt(&self) -> CtOption<Self> {
        match tonelli_shanks(self, &Fp6::v(), 6) {
            Some(root) => CtOption::new(root, Choice::from(1)),
            None => CtOption::new(Fp6::zero(), Choice::from(0)),
        }
    }

    /// Add elements
    #[inline]
    pub fn add(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }

    /// Subtract elements
    #[inline]
    pub fn sub(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }

    /// Negate element
    #[inline]
    pub fn neg(&self) -> Fp6 {
        Fp6 {
            c0: -self.c0,
            c1: -self.c1,
            c2: -self.c2,
        }
    }

    /// Double element
    #[inline]
    pub fn double(&self) -> Fp6 {
        Fp6 {
            c0: self.c0.double(),
            c1: self.c1.double(),
            c2: self.c2.double(),
        }
    }

    /// Halve element
    #[inline]
    pub fn div_by_two(&self) -> Fp6 {
        Fp6 {
            c0: self.c0.div_by_two(),
            c1: self.c1.div_by_two(),
            c2: self.c2.div_by_two(),
        }
    }

    /// Big-endian bytes, c0 then c1 then c2
    pub fn to_bytes(self) -> [u8; FP6_BYTES] {
        let mut res = [0u8; FP6_BYTES];
        res[..FP2_BYTES].copy_from_slice(&self.c0.to_bytes());
        res[FP2_BYTES..2 * FP2_BYTES].copy_from_slice(&self.c1.to_bytes());
        res[2 * FP2_BYTES..].copy_from_slice(&self.c2.to_bytes());
        res
    }

    /// Parse from a slice of exactly 192 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Fp6> {
        validate::length("Fp6::from_slice", bytes.len(), FP6_BYTES)?;
        Ok(Fp6 {
            c0: Fp2::from_slice(&bytes[..FP2_BYTES])?,
            c1: Fp2::from_slice(&bytes[FP2_BYTES..2 * FP2_BYTES])?,
            c2: Fp2::from_slice(&bytes[2 * FP2_BYTES..])?,
        })
    }
}

impl Fp6Double {
    /// Zero accumulator
    pub const fn zero() -> Fp6Double {
        Fp6Double {
            c0: Fp2Double::zero(),
            c1: Fp2Double::zero(),
            c2: Fp2Double::zero(),
        }
    }

    /// Coefficient-wise sum
    #[inline]
    pub const fn add(&self, rhs: &Fp6Double) -> Fp6Double {
        Fp6Double {
            c0: self.c0.add(&rhs.c0),
            c1: self.c1.add(&rhs.c1),
            c2: self.c2.add(&rhs.c2),
        }
    }

    /// Coefficient-wise difference
    #[inline]
    pub const fn sub(&self, rhs: &Fp6Double) -> Fp6Double {
        Fp6Double {
            c0: self.c0.sub(&rhs.c0),
            c1: self.c1.sub(&rhs.c1),
            c2: self.c2.sub(&rhs.c2),
        }
    }

    /// Coefficient-wise sum without correction
    #[inline]
    pub const fn add_no_reduction(&self, rhs: &Fp6Double) -> Fp6Double {
        Fp6Double {
            c0: self.c0.add_no_reduction(&rhs.c0),
            c1: self.c1.add_no_reduction(&rhs.c1),
            c2: self.c2.add_no_reduction(&rhs.c2),
        }
    }

    /// Multiply by v on the unreduced form
    #[inline]
    pub const fn mul_by_v(&self) -> Fp6Double {
        Fp6Double {
            c0: self.c2.mul_by_xi(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Reduce each coefficient
    #[inline]
    pub const fn reduce(&self) -> Fp6 {
        Fp6 {
            c0: self.c0.reduce(),
            c1: self.c1.reduce(),
            c2: self.c2.reduce(),
        }
    }
}

impl DoubleElement for Fp6Double {
    type Single = Fp6;

    fn zero() -> Self {
        Fp6Double::zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fp6Double::add(self, rhs)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fp6Double::sub(self, rhs)
    }

    fn add_no_reduction(&self, rhs: &Self) -> Self {
        Fp6Double::add_no_reduction(self, rhs)
    }

    fn reduce(&self) -> Fp6 {
        Fp6Double::reduce(self)
    }
}

impl<'a, 'b> Mul<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn mul(self, other: &'b Fp6) -> Self::Output {
        self.mul_unreduced(other).reduce()
    }
}

impl<'a, 'b> Add<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn add(self, rhs: &'b Fp6) -> Self::Output {
        self.add(rhs)
    }
}

impl<'a> Neg for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn neg(self) -> Self::Output {
        self.neg()
    }
}

impl<'a, 'b> Sub<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn sub(self, rhs: &'b Fp6) -> Self::Output {
        self.sub(rhs)
    }
}

impl_neg_owned!(Fp6);
impl_binops_additive!(Fp6, Fp6);
impl_binops_multiplicative!(Fp6, Fp6);

impl Field for Fp6 {
    type Double = Fp6Double;

    const DEGREE: usize = 6;
    const COEFFICIENT_SIZE: usize = FP_BYTES;

    fn zero() -> Self {
        Fp6::zero()
    }

    fn one() -> Self {
        Fp6::one()
    }

    fn is_zero(&self) -> bool {
        bool::from(Fp6::is_zero(self))
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Fp6::random(rng)
    }

    fn square(&self) -> Self {
        Fp6::square(self)
    }

    fn double(&self) -> Self {
        Fp6::double(self)
    }

    fn invert(&self) -> CoreResult<Self> {
        Option::from(Fp6::invert(self))
            .ok_or_else(|| CoreError::from(Error::param("Fp6::invert", "zero has no inverse")))
    }

    fn sqrt(&self) -> CoreResult<Self> {
        Option::from(Fp6::sqrt(self)).ok_or_else(|| {
            CoreError::from(Error::param("Fp6::sqrt", "element is not a quadratic residue"))
        })
    }

    fn div_by_two(&self) -> Self {
        Fp6::div_by_two(self)
    }

    fn mul_double(&self, rhs: &Self) -> Fp6Double {
        self.mul_unreduced(rhs)
    }

    fn square_double(&self) -> Fp6Double {
        self.square_unreduced()
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Fp6::frobenius_map(self, power)
    }

    fn to_byte_array(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_byte_array(bytes: &[u8]) -> CoreResult<Self> {
        Fp6::from_slice(bytes).map_err(CoreError::from)
    }
}

//! Quadratic extension Fp12 = Fp6[w]/(w^2 - v), the pairing target field

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use isopair_api::{DoubleElement, Error as CoreError, Field, Result as CoreResult};
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::{Fp, FP_BYTES};
use super::fp2::Fp2;
use super::fp6::{Fp6, Fp6Double, FP6_BYTES};
use super::tonelli_shanks;
use crate::error::{validate, Error, Result};

/// Encoded size in bytes
pub const FP12_BYTES: usize = 2 * FP6_BYTES;

/// xi^((q^k - 1) / 6) for k = 1, 2, 3
const FROBENIUS_COEFF_C1: [Fp2; 3] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x2728_3800_75e9_4f74,
            0x144f_87f9_c79b_1f6b,
            0xd591_0ffe_d2c9_2f70,
            0x1830_373e_e92a_cf9f,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7fd7_c7ff_8a16_b09f,
            0x4cd1_7806_3864_e0a8,
            0xe4a3_3d81_2d36_d098,
            0x0cf3_2d43_56d5_3061,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xa191_0397_1796_02be,
            0x448e_df6e_c728_45b2,
            0xf9cf_30ac_a6b2_9ba2,
            0x027a_e696_8000_0011,
        ]),
        c1: Fp::zero(),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xa9aa_3a23_8e98_b89c,
            0x9cc6_74b1_a926_a976,
            0x5b33_3738_d351_dd93,
            0x0a7c_8ae7_22ee_a1f7,
        ]),
        c1: Fp::from_raw_unchecked([
            0xfd55_c5dc_7167_4777,
            0xc45a_8b4e_56d9_569c,
            0x5f01_1647_2cae_2274,
            0x1aa6_d99b_1d11_5e0a,
        ]),
    },
];

/// Element c0 + c1 * w
#[derive(Copy, Clone, Debug)]
pub struct Fp12 {
    /// Constant coefficient
    pub c0: Fp6,
    /// Coefficient of w
    pub c1: Fp6,
}

/// Unreduced Fp12 product
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fp12Double {
    /// Constant coefficient
    pub c0: Fp6Double,
    /// Coefficient of w
    pub c1: Fp6Double,
}

impl From<Fp> for Fp12 {
    fn from(f: Fp) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp2> for Fp12 {
    fn from(f: Fp2) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp6> for Fp12 {
    fn from(f: Fp6) -> Fp12 {
        Fp12 {
            c0: f,
            c1: Fp6::zero(),
        }
    }
}

impl PartialEq for Fp12 {
    fn eq(&self, other: &Fp12) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp12 {}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp12 {}
impl zeroize::DefaultIsZeroes for Fp12Double {}

impl fmt::Display for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + ({})*w", self.c0, self.c1)
    }
}

impl ConditionallySelectable for Fp12 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp12 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Fp12 {
    /// Zero element
    #[inline]
    pub const fn zero() -> Self {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    /// One element
    #[inline]
    pub const fn one() -> Self {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    /// The generator w, a quadratic non-residue
    #[inline]
    pub const fn w() -> Self {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::one(),
        }
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp12 {
            c0: Fp6::random(&mut rng),
            c1: Fp6::random(&mut rng),
        }
    }

    /// Check if zero
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Check if one
    #[inline]
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Fp12::one())
    }

    /// Multiply by the sparse line value l0 + (l3 + l4 * v) * w
    pub fn mul_by_034(&self, l0: &Fp2, l3: &Fp2, l4: &Fp2) -> Fp12 {
        let a = self.c0.mul_by_fp2(l0);
        let b = self.c1.mul_by_01(l3, l4);

        let c0 = l0 + l3;
        let c1 = (self.c1 + self.c0).mul_by_01(&c0, l4) - a - b;
        let c0 = b.mul_by_v() + a;

        Fp12 { c0, c1 }
    }

    /// Conjugation over Fp6, the q^6 Frobenius
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// x -> x^(q^k) for k = 1, 2, 3
    fn frobenius_step(&self, k: usize) -> Self {
        debug_assert!((1..=3).contains(&k));
        let c0 = self.c0.frobenius_map(k);
        let c1 = self.c1.frobenius_map(k).mul_by_fp2(&FROBENIUS_COEFF_C1[k - 1]);

        Fp12 { c0, c1 }
    }

    /// x -> x^(q^power), composed from the literal tables
    pub fn frobenius_map(&self, power: usize) -> Self {
        let mut res = *self;
        let mut k = power % 12;
        if k >= 6 {
            res = res.conjugate();
            k -= 6;
        }
        while k > 0 {
            let step = k.min(3);
            res = res.frobenius_step(step);
            k -= step;
        }
        res
    }

    /// Granger-Scott squaring, valid only for elements of the cyclotomic subgroup
    pub fn cyclotomic_square(&self) -> Self {
        // Squaring in Fp4 = Fp2[y]/(y^2 - xi)
        fn fp4_square(a: &Fp2, b: &Fp2) -> (Fp2, Fp2) {
            let t0 = a.square_unreduced();
            let t1 = b.square_unreduced();
            let c0 = t1.mul_xi_add(&t0).reduce();
            let c1 = (a + b).square_unreduced().sub(&t0).sub(&t1).reduce();
            (c0, c1)
        }

        let mut z0 = self.c0.c0;
        let mut z4 = self.c0.c1;
        let mut z3 = self.c0.c2;
        let mut z2 = self.c1.c0;
        let mut z1 = self.c1.c1;
        let mut z5 = self.c1.c2;

        let (t0, t1) = fp4_square(&z0, &z1);

        // z0 = 3 * t0 - 2 * z0
        z0 = t0 - z0;
        z0 = z0 + z0 + t0;

        // z1 = 3 * t1 + 2 * z1
        z1 = t1 + z1;
        z1 = z1 + z1 + t1;

        let (t0, t1) = fp4_square(&z2, &z3);
        let (t2, t3) = fp4_square(&z4, &z5);

        z4 = t0 - z4;
        z4 = z4 + z4 + t0;

        z5 = t1 + z5;
        z5 = z5 + z5 + t1;

        let t0 = t3.mul_by_xi();
        z2 = t0 + z2;
        z2 = z2 + z2 + t0;

        z3 = t2 - z3;
        z3 = z3 + z3 + t2;

        Fp12 {
            c0: Fp6 {
                c0: z0,
                c1: z4,
                c2: z3,
            },
            c1: Fp6 {
                c0: z2,
                c1: z1,
                c2: z5,
            },
        }
    }

    /// Two-term Karatsuba left unreduced
    pub fn mul_unreduced(&self, rhs: &Self) -> Fp12Double {
        let t0 = self.c0.mul_unreduced(&rhs.c0);
        let t1 = self.c1.mul_unreduced(&rhs.c1);
        let t2 = (self.c0 + self.c1).mul_unreduced(&(rhs.c0 + rhs.c1));

        Fp12Double {
            c0: t1.mul_by_v().add(&t0),
            c1: t2.sub(&t0).sub(&t1),
        }
    }

    /// Complex squaring left unreduced
    pub fn square_unreduced(&self) -> Fp12Double {
        let ab = self.c0.mul_unreduced(&self.c1);
        let c0 = (self.c0 + self.c1)
            .mul_unreduced(&(self.c0 + self.c1.mul_by_v()))
            .sub(&ab)
            .sub(&ab.mul_by_v());

        Fp12Double {
            c0,
            c1: ab.add(&ab),
        }
    }

    /// Square element
    #[inline]
    pub fn square(&self) -> Self {
        self.square_unreduced().reduce()
    }

    /// Inverse as the conjugate over the norm c0^2 - v * c1^2
    pub fn invert(&self) -> CtOption<Self> {
        self.c0
            .square_unreduced()
            .sub(&self.c1.square_unreduced().mul_by_v())
            .reduce()
            .invert()
            .map(|t| Fp12 {
                c0: self.c0 * t,
                c1: self.c1 * -t,
            })
    }

    /// Square root by Tonelli-Shanks with the non-residue w
    pub fn sqrt(&self) -> CtOption<Self> {
        match tonelli_shanks(self, &Fp12::w(), 12) {
            Some(root) => CtOption::new(root, Choice::from(1)),
            None => CtOption::new(Fp12::zero(), Choice::from(0)),
        }
    }

    /// Double element
    #[inline]
    pub fn double(&self) -> Self {
        Fp12 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Halve element
    #[inline]
    pub fn div_by_two(&self) -> Self {
        Fp12 {
            c0: self.c0.div_by_two(),
            c1: self.c1.div_by_two(),
        }
    }

    /// Big-endian bytes, c0 then c1
    pub fn to_bytes(self) -> [u8; FP12_BYTES] {
        let mut res = [0u8; FP12_BYTES];
        res[..FP6_BYTES].copy_from_slice(&self.c0.to_bytes());
        res[FP6_BYTES..].copy_from_slice(&self.c1.to_bytes());
        res
    }

    /// Parse from a slice of exactly 384 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Fp12> {
        validate::length("Fp12::from_slice", bytes.len(), FP12_BYTES)?;
        Ok(Fp12 {
            c0: Fp6::from_slice(&bytes[..FP6_BYTES])?,
            c1: Fp6::from_slice(&bytes[FP6_BYTES..])?,
        })
    }
}

impl Fp12Double {
    /// Zero accumulator
    pub const fn zero() -> Fp12Double {
        Fp12Double {
            c0: Fp6Double::zero(),
            c1: Fp6Double::zero(),
        }
    }

    /// Coefficient-wise sum
    #[inline]
    pub const fn add(&self, rhs: &Fp12Double) -> Fp12Double {
        Fp12Double {
            c0: self.c0.add(&rhs.c0),
            c1: self.c1.add(&rhs.c1),
        }
    }

    /// Coefficient-wise difference
    #[inline]
    pub const fn sub(&self, rhs: &Fp12Double) -> Fp12Double {
        Fp12Double {
            c0: self.c0.sub(&rhs.c0),
            c1: self.c1.sub(&rhs.c1),
        }
    }

    /// Coefficient-wise sum without correction
    #[inline]
    pub const fn add_no_reduction(&self, rhs: &Fp12Double) -> Fp12Double {
        Fp12Double {
            c0: self.c0.add_no_reduction(&rhs.c0),
            c1: self.c1.add_no_reduction(&rhs.c1),
        }
    }

    /// Reduce each coefficient
    #[inline]
    pub const fn reduce(&self) -> Fp12 {
        Fp12 {
            c0: self.c0.reduce(),
            c1: self.c1.reduce(),
        }
    }
}

impl DoubleElement for Fp12Double {
    type Single = Fp12;

    fn zero() -> Self {
        Fp12Double::zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fp12Double::add(self, rhs)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fp12Double::sub(self, rhs)
    }

    fn add_no_reduction(&self, rhs: &Self) -> Self {
        Fp12Double::add_no_reduction(self, rhs)
    }

    fn reduce(&self) -> Fp12 {
        Fp12Double::reduce(self)
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn mul(self, other: &'b Fp12) -> Self::Output {
        self.mul_unreduced(other).reduce()
    }
}

impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn add(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Self::Output {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn sub(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}

impl_neg_owned!(Fp12);
impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);

impl Field for Fp12 {
    type Double = Fp12Double;

    const DEGREE: usize = 12;
    const COEFFICIENT_SIZE: usize = FP_BYTES;

    fn zero() -> Self {
        Fp12::zero()
    }

    fn one() -> Self {
        Fp12::one()
    }

    fn is_zero(&self) -> bool {
        bool::from(Fp12::is_zero(self))
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Fp12::random(rng)
    }

    fn square(&self) -> Self {
        Fp12::square(self)
    }

    fn double(&self) -> Self {
        Fp12::double(self)
    }

    fn invert(&self) -> CoreResult<Self> {
        Option::from(Fp12::invert(self))
            .ok_or_else(|| CoreError::from(Error::param("Fp12::invert", "zero has no inverse")))
    }

    fn sqrt(&self) -> CoreResult<Self> {
        Option::from(Fp12::sqrt(self)).ok_or_else(|| {
            CoreError::from(Error::param("Fp12::sqrt", "element is not a quadratic residue"))
        })
    }

    fn div_by_two(&self) -> Self {
        Fp12::div_by_two(self)
    }

    fn mul_double(&self, rhs: &Self) -> Fp12Double {
        self.mul_unreduced(rhs)
    }

    fn square_double(&self) -> Fp12Double {
        self.square_unreduced()
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Fp12::frobenius_map(self, power)
    }

    fn to_byte_array(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_byte_array(bytes: &[u8]) -> CoreResult<Self> {
        Fp12::from_slice(bytes).map_err(CoreError::from)
    }
}

//! Quadratic extension Fp2 = Fp[u]/(u^2 + 1)

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use isopair_api::{DoubleElement, Error as CoreError, Field, Result as CoreResult};
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::{Fp, FpDouble, FP_BYTES, LEGENDRE_EXP, Q_MINUS_3_DIV_4};
use crate::error::{validate, Error, Result};

/// Encoded size in bytes
pub const FP2_BYTES: usize = 2 * FP_BYTES;

/// Element c0 + c1 * u of the quadratic extension
#[derive(Copy, Clone, Debug)]
pub struct Fp2 {
    /// Real part
    pub c0: Fp,
    /// Coefficient of u
    pub c1: Fp,
}

/// Unreduced Fp2 product, one [`FpDouble`] per coefficient
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fp2Double {
    /// Real part
    pub c0: FpDouble,
    /// Coefficient of u
    pub c1: FpDouble,
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp2 {}
impl zeroize::DefaultIsZeroes for Fp2Double {}

impl fmt::Display for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 { c0: f, c1: Fp::zero() }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        self.neg()
    }
}

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        self.mul(rhs)
    }
}

impl_neg_owned!(Fp2);
impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);

impl Fp2 {
    /// Build from coefficients
    #[inline]
    pub const fn new(c0: Fp, c1: Fp) -> Fp2 {
        Fp2 { c0, c1 }
    }

    /// Zero element
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// One element
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    /// Frobenius map x -> x^q, which is conjugation
    #[inline(always)]
    pub fn frobenius_map(&self) -> Self {
        self.conjugate()
    }

    /// Conjugate c0 - c1 * u
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Multiply by xi = 1 + u: (a + bu)(1 + u) = (a - b) + (a + b)u
    #[inline(always)]
    pub const fn mul_by_xi(&self) -> Fp2 {
        Fp2 {
            c0: (&self.c0).sub(&self.c1),
            c1: (&self.c0).add(&self.c1),
        }
    }

    /// Multiply both coefficients by a base-field element
    #[inline]
    pub const fn mul_by_fp(&self, k: &Fp) -> Fp2 {
        Fp2 {
            c0: (&self.c0).mul(k),
            c1: (&self.c1).mul(k),
        }
    }

    /// Check if lexicographically largest: compare c1, then c0 when c1 is zero
    #[inline]
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Complex squaring: (a + bu)^2 = (a + b)(a - b) + 2ab * u
    pub const fn square(&self) -> Fp2 {
        let a = (&self.c0).add(&self.c1);
        let b = (&self.c0).sub(&self.c1);
        let c = (&self.c0).add(&self.c0);

        Fp2 {
            c0: (&a).mul(&b),
            c1: (&c).mul(&self.c1),
        }
    }

    /// Karatsuba product with a single reduction per coefficient
    pub const fn mul(&self, rhs: &Fp2) -> Fp2 {
        self.mul_unreduced(rhs).reduce()
    }

    /// Karatsuba product left unreduced
    pub const fn mul_unreduced(&self, rhs: &Fp2) -> Fp2Double {
        let t0 = self.c0.mul_unreduced(&rhs.c0);
        let t1 = self.c1.mul_unreduced(&rhs.c1);
        let t2 = (&self.c0).add(&self.c1).mul_unreduced(&(&rhs.c0).add(&rhs.c1));

        Fp2Double {
            c0: t0.sub(&t1),
            c1: t2.sub(&t0).sub(&t1),
        }
    }

    /// Complex squaring left unreduced
    pub const fn square_unreduced(&self) -> Fp2Double {
        let a = (&self.c0).add(&self.c1);
        let b = (&self.c0).sub(&self.c1);
        let c = (&self.c0).add(&self.c0);

        Fp2Double {
            c0: a.mul_unreduced(&b),
            c1: c.mul_unreduced(&self.c1),
        }
    }

    /// Add elements
    pub const fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).add(&rhs.c0),
            c1: (&self.c1).add(&rhs.c1),
        }
    }

    /// Subtract elements
    pub const fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).sub(&rhs.c0),
            c1: (&self.c1).sub(&rhs.c1),
        }
    }

    /// Negate element
    pub const fn neg(&self) -> Fp2 {
        Fp2 {
            c0: (&self.c0).neg(),
            c1: (&self.c1).neg(),
        }
    }

    /// Double element
    pub const fn double(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Halve element
    pub const fn div_by_two(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.div_by_two(),
            c1: self.c1.div_by_two(),
        }
    }

    /// Norm c0^2 + c1^2 down to the base field
    pub fn norm(&self) -> Fp {
        self.c0.square_unreduced().add(&self.c1.square_unreduced()).reduce()
    }

    /// Square root by the complex method for q ≡ 3 (mod 4)
    pub fn sqrt(&self) -> CtOption<Self> {
        // Algorithm 9, https://eprint.iacr.org/2012/685.pdf
        CtOption::new(Fp2::zero(), self.is_zero()).or_else(|| {
            let a1 = self.pow_vartime(&Q_MINUS_3_DIV_4);
            let alpha = a1.square() * self;
            let x0 = self * a1;

            // alpha == -1 gives u * x0
            CtOption::new(
                Fp2 {
                    c0: -x0.c1,
                    c1: x0.c0,
                },
                alpha.ct_eq(&(&Fp2::one()).neg()),
            )
            .or_else(|| {
                CtOption::new(
                    (alpha + Fp2::one()).pow_vartime(&LEGENDRE_EXP) * x0,
                    Choice::from(1),
                )
            })
            .and_then(|sqrt| CtOption::new(sqrt, sqrt.square().ct_eq(self)))
        })
    }

    /// Inverse through the norm: conj(a) / (c0^2 + c1^2)
    pub fn invert(&self) -> CtOption<Self> {
        self.norm().invert().map(|t| Fp2 {
            c0: self.c0 * t,
            c1: self.c1 * -t,
        })
    }

    /// Variable-time exponentiation
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

    /// Big-endian bytes, c0 then c1
    pub fn to_bytes(self) -> [u8; FP2_BYTES] {
        let mut res = [0u8; FP2_BYTES];
        res[..FP_BYTES].copy_from_slice(&self.c0.to_bytes());
        res[FP_BYTES..].copy_from_slice(&self.c1.to_bytes());
        res
    }

    /// Parse c0 then c1; both must be canonical
    pub fn from_bytes(bytes: &[u8; FP2_BYTES]) -> CtOption<Fp2> {
        let mut c0 = [0u8; FP_BYTES];
        let mut c1 = [0u8; FP_BYTES];
        c0.copy_from_slice(&bytes[..FP_BYTES]);
        c1.copy_from_slice(&bytes[FP_BYTES..]);

        let c0 = Fp::from_bytes(&c0);
        let c1 = Fp::from_bytes(&c1);
        c0.and_then(|c0| c1.map(|c1| Fp2 { c0, c1 }))
    }

    /// Parse from a slice of exactly 64 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Fp2> {
        validate::length("Fp2::from_slice", bytes.len(), FP2_BYTES)?;
        Ok(Fp2 {
            c0: Fp::from_slice(&bytes[..FP_BYTES])?,
            c1: Fp::from_slice(&bytes[FP_BYTES..])?,
        })
    }
}

impl Fp2Double {
    /// Zero accumulator
    pub const fn zero() -> Fp2Double {
        Fp2Double {
            c0: FpDouble::zero(),
            c1: FpDouble::zero(),
        }
    }

    /// Coefficient-wise sum
    #[inline]
    pub const fn add(&self, rhs: &Fp2Double) -> Fp2Double {
        Fp2Double {
            c0: self.c0.add(&rhs.c0),
            c1: self.c1.add(&rhs.c1),
        }
    }

    /// Coefficient-wise difference
    #[inline]
    pub const fn sub(&self, rhs: &Fp2Double) -> Fp2Double {
        Fp2Double {
            c0: self.c0.sub(&rhs.c0),
            c1: self.c1.sub(&rhs.c1),
        }
    }

    /// Coefficient-wise sum without correction
    #[inline]
    pub const fn add_no_reduction(&self, rhs: &Fp2Double) -> Fp2Double {
        Fp2Double {
            c0: self.c0.add_no_reduction(&rhs.c0),
            c1: self.c1.add_no_reduction(&rhs.c1),
        }
    }

    /// Negation
    #[inline]
    pub const fn neg(&self) -> Fp2Double {
        Fp2Double {
            c0: self.c0.neg(),
            c1: self.c1.neg(),
        }
    }

    /// Multiply by xi on the unreduced form
    #[inline]
    pub const fn mul_by_xi(&self) -> Fp2Double {
        Fp2Double {
            c0: self.c0.sub(&self.c1),
            c1: self.c0.add(&self.c1),
        }
    }

    /// xi * self + y, fused
    #[inline]
    pub const fn mul_xi_add(&self, y: &Fp2Double) -> Fp2Double {
        Fp2Double {
            c0: self.c0.sub(&self.c1).add(&y.c0),
            c1: self.c0.add(&self.c1).add(&y.c1),
        }
    }

    /// Reduce each coefficient
    #[inline]
    pub const fn reduce(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.reduce(),
            c1: self.c1.reduce(),
        }
    }
}

impl DoubleElement for Fp2Double {
    type Single = Fp2;

    fn zero() -> Self {
        Fp2Double::zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fp2Double::add(self, rhs)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fp2Double::sub(self, rhs)
    }

    fn add_no_reduction(&self, rhs: &Self) -> Self {
        Fp2Double::add_no_reduction(self, rhs)
    }

    fn reduce(&self) -> Fp2 {
        Fp2Double::reduce(self)
    }
}

impl Field for Fp2 {
    type Double = Fp2Double;

    const DEGREE: usize = 2;
    const COEFFICIENT_SIZE: usize = FP_BYTES;

    fn zero() -> Self {
        Fp2::zero()
    }

    fn one() -> Self {
        Fp2::one()
    }

    fn is_zero(&self) -> bool {
        bool::from(Fp2::is_zero(self))
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Fp2::random(rng)
    }

    fn square(&self) -> Self {
        Fp2::square(self)
    }

    fn double(&self) -> Self {
        Fp2::double(self)
    }

    fn invert(&self) -> CoreResult<Self> {
        Option::from(Fp2::invert(self))
            .ok_or_else(|| CoreError::from(Error::param("Fp2::invert", "zero has no inverse")))
    }

    fn sqrt(&self) -> CoreResult<Self> {
        Option::from(Fp2::sqrt(self)).ok_or_else(|| {
            CoreError::from(Error::param("Fp2::sqrt", "element is not a quadratic residue"))
        })
    }

    fn div_by_two(&self) -> Self {
        Fp2::div_by_two(self)
    }

    fn mul_double(&self, rhs: &Self) -> Fp2Double {
        self.mul_unreduced(rhs)
    }

    fn square_double(&self) -> Fp2Double {
        self.square_unreduced()
    }

    fn frobenius_map(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            *self
        }
    }

    fn to_byte_array(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_byte_array(bytes: &[u8]) -> CoreResult<Self> {
        Fp2::from_slice(bytes).map_err(CoreError::from)
    }
}
